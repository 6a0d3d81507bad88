/// Domain layer: entities and value objects with no I/O beyond path checks
pub mod entities;
pub mod value_objects;
