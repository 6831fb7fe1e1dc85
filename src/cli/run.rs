//! Run command.
//!
//! Binds every configured binding and executes a command with the variables
//! injected into its environment.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info_span};
use zeroize::Zeroizing;

use crate::core::context::BindContext;
use crate::core::variables::VariableMap;
use crate::error::{Error, Result};

/// Replacement for secret values in masked output.
const MASK: &[u8] = b"****";

/// Run a command with bound variables as environment variables.
///
/// Exits the process with the command's exit code.
pub fn execute(config: &Path, command: &[String], mask: bool) -> Result<()> {
    let exit_code = bind_and_run(config, command, mask)?;
    std::process::exit(exit_code);
}

/// Bind the job and run `command`, returning its exit code.
///
/// Credentials and bound variables are dropped, and so wiped, on return.
fn bind_and_run(config: &Path, command: &[String], mask: bool) -> Result<i32> {
    let (config_file, registry) = super::load(config)?;
    let job = config_file.job(&registry)?;
    let store = config_file.store(&registry)?;
    let clients = config_file.client_factory();

    let ctx = BindContext::new().with_span(info_span!("bind", config = %config.display()));
    let vars = job.bind(&ctx, &store, &clients)?;
    debug!(variables = vars.len(), "bound variables");

    run_with_variables(&vars, command, mask)
}

/// Run a command with `vars` in its environment.
fn run_with_variables(vars: &VariableMap, command: &[String], mask: bool) -> Result<i32> {
    if command.is_empty() {
        return Err(Error::Other("no command specified".to_string()));
    }

    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..]);
    vars.apply(&mut cmd);

    let secrets = mask_patterns(vars);
    if !mask || secrets.is_empty() {
        let status = cmd.status()?;
        return Ok(status.code().unwrap_or(1));
    }
    let secrets = Arc::new(secrets);

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    let mut pumps = Vec::new();
    if let Some(out) = child.stdout.take() {
        let secrets = Arc::clone(&secrets);
        pumps.push(thread::spawn(move || pump(out, io::stdout(), &secrets)));
    }
    if let Some(err) = child.stderr.take() {
        let secrets = Arc::clone(&secrets);
        pumps.push(thread::spawn(move || pump(err, io::stderr(), &secrets)));
    }

    let status = child.wait()?;
    for handle in pumps {
        handle
            .join()
            .map_err(|_| Error::Other("output forwarding thread panicked".to_string()))??;
    }
    Ok(status.code().unwrap_or(1))
}

/// Byte patterns to mask in the child's output, longest first.
///
/// Output is masked line by line, so a multi-line secret is also masked
/// through each of its non-blank lines.
fn mask_patterns(vars: &VariableMap) -> Vec<Zeroizing<Vec<u8>>> {
    let mut patterns: Vec<Zeroizing<Vec<u8>>> = Vec::new();
    for value in vars.secret_values() {
        patterns.push(Zeroizing::new(value.as_bytes().to_vec()));
        if value.contains('\n') {
            for line in value.lines() {
                let line = line.trim_end_matches('\r');
                if !line.trim().is_empty() {
                    patterns.push(Zeroizing::new(line.as_bytes().to_vec()));
                }
            }
        }
    }
    // Longest first so a secret containing another is masked whole.
    patterns.sort_by_key(|p| std::cmp::Reverse(p.len()));
    patterns
}

/// Copy `input` to `output` line by line with secrets masked.
fn pump(input: impl Read, mut output: impl Write, secrets: &[Zeroizing<Vec<u8>>]) -> Result<()> {
    let mut reader = BufReader::new(input);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        output.write_all(&mask_line(&line, secrets))?;
        output.flush()?;
    }
    Ok(())
}

fn mask_line(line: &[u8], secrets: &[Zeroizing<Vec<u8>>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    let mut i = 0;
    'scan: while i < line.len() {
        for secret in secrets {
            if !secret.is_empty() && line[i..].starts_with(secret) {
                out.extend_from_slice(MASK);
                i += secret.len();
                continue 'scan;
            }
        }
        out.push(line[i]);
        i += 1;
    }
    out
}
