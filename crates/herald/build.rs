#![allow(clippy::disallowed_macros)]

use std::process::Command;

/// Build metadata exposed to the banner as `HERALD_*` environment variables.
fn main() {
	let status = git(&["status", "--porcelain"]);
	let dirty = if status.is_empty() || status == "unknown" {
		""
	} else {
		"-dirty"
	};
	let target = format!(
		"{}-{}",
		cargo_cfg("CARGO_CFG_TARGET_ARCH"),
		cargo_cfg("CARGO_CFG_TARGET_OS")
	);

	let metadata = [
		("HERALD_GIT_HASH", git(&["rev-parse", "--short", "HEAD"])),
		("HERALD_GIT_BRANCH", git(&["rev-parse", "--abbrev-ref", "HEAD"])),
		("HERALD_GIT_DIRTY", dirty.to_string()),
		("HERALD_BUILD_DATE", output("date", &["+%Y-%m-%d %H:%M:%S"])),
		("HERALD_RUSTC_VERSION", output("rustc", &["--version"])),
		("HERALD_TARGET", target),
	];
	for (key, value) in metadata {
		println!("cargo:rustc-env={}={}", key, value);
	}

	println!("cargo:rerun-if-changed=../../.git/HEAD");
	println!("cargo:rerun-if-changed=../../.git/refs");
}

fn cargo_cfg(key: &str) -> String {
	std::env::var(key).unwrap_or_else(|_| "unknown".into())
}

fn git(args: &[&str]) -> String {
	output("git", args)
}

fn output(cmd: &str, args: &[&str]) -> String {
	Command::new(cmd)
		.args(args)
		.output()
		.ok()
		.filter(|out| out.status.success())
		.and_then(|out| String::from_utf8(out.stdout).ok())
		.unwrap_or_else(|| "unknown".into())
		.trim()
		.to_string()
}
