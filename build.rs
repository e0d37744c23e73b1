use std::error::Error;

use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

// Feeds `VERGEN_GIT_SHA` and `VERGEN_CARGO_TARGET_TRIPLE` into `mfgdir_cli::VERSION`.
fn main() -> Result<(), Box<dyn Error>> {
	let cargo = CargoBuilder::default().target_triple(true).build()?;
	let git = GitclBuilder::default().sha(true).build()?;

	Emitter::default().add_instructions(&cargo)?.add_instructions(&git)?.emit()?;

	Ok(())
}
