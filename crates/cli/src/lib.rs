// Library surface of the hfmatch CLI, shared by the binary and its tests.

pub mod workflow;
