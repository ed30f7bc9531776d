/// Analysis on a filtered view: quadrant classification against the
/// reference norms and per-test force-velocity profile lines.

pub mod profile;
pub mod quadrant;
