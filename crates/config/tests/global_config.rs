use config::BOT_CONF;
use config::BotConfig;
use config::Cli;
use config::bot_config;
use serial_test::serial;

fn ensure_init() {
	// Already initialized by another test in this binary: init is a no-op.
	BOT_CONF.init(BotConfig::default(), Cli::default());
	assert!(BOT_CONF.is_initialized());
}

#[test]
#[serial]
fn test_config_singleton() {
	ensure_init();
	BOT_CONF.update(BotConfig::default()).unwrap();

	let host = &bot_config!(host);
	assert_eq!(host, "127.0.0.1");
	assert_eq!(bot_config!(show_fast_delay_ms), 3000);
	assert_eq!(bot_config!(commands.echo.echo_delay_ms), 1000);
}

#[test]
#[serial]
fn test_update_is_visible_to_readers() {
	ensure_init();
	let before = BOT_CONF.load_full();

	let mut next = (*before).clone();
	next.commands.echo.echo_delay_ms = 4000;
	BOT_CONF.update(next).unwrap();
	assert_eq!(bot_config!(commands.echo.echo_delay_ms), 4000);

	// A guard taken before the update keeps the old snapshot.
	assert_eq!(before.commands.echo.echo_delay_ms, 1000);
	BOT_CONF.update((*before).clone()).unwrap();
}
