pub const LOGO: &str = r#"
 _                     _     _
| |__   ___ _ __ __ _ | | __| |
| '_ \ / _ \ '__/ _` || |/ _` |
| | | |  __/ | | (_| || | (_| |
|_| |_|\___|_|  \__,_||_|\__,_|
"#;

pub fn banner(commands: &[String]) -> String {
	let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
	format!(
		"{}\n\
		 Version:     v{} ({}{} on {})\n\
		 Built:       {} for {} with {}\n\
		 Commands:    {}\n\
		 Started:     {}\n",
		LOGO.trim_end(),
		env!("CARGO_PKG_VERSION"),
		env!("HERALD_GIT_HASH"),
		env!("HERALD_GIT_DIRTY"),
		env!("HERALD_GIT_BRANCH"),
		env!("HERALD_BUILD_DATE"),
		env!("HERALD_TARGET"),
		env!("HERALD_RUSTC_VERSION"),
		commands.join(", "),
		now
	)
}

pub fn show_logo(commands: &[String]) {
	println!("{}", banner(commands));
}
