pub mod coerce;
pub mod decision;
pub mod populate;
pub mod resolver;
