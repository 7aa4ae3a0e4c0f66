//! Exit codes of the `ifeval` binary. Scripts rely on these values.

pub const SUCCESS: i32 = 0;
pub const CONSTRAINT_FAILED: i32 = 1; // At least one constraint was violated
pub const CONFIG_ERROR: i32 = 2; // Suite, judge config or registry is invalid
pub const EVALUATION_ERROR: i32 = 3; // A constraint errored (judge failure, timeout)
