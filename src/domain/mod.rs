// Domain layer: the resident record and its pricing policy. No I/O.

pub mod model;
