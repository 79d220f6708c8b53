//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use site_graph::{MOUNT_ID, init_logging, mount};

fn main() {
	init_logging();
	mount(MOUNT_ID);
}
