use std::{fs, io, path::Path};

use anyhow::Result;
use clap_complete::{generate, Shell};

use fleet_cli::cli::build_cli_command;

use super::util::ensure_parent;

pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    if let Some(path) = out {
        ensure_parent(path)?;
        let mut file = fs::File::create(path)?;
        generate(shell, &mut cmd, "fleet", &mut file);
        println!("Wrote {shell:?} completion to {}", path.display());
    } else {
        let stdout = &mut io::stdout();
        generate(shell, &mut cmd, "fleet", stdout);
    }
    Ok(())
}
