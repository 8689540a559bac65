use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use command::Args;
use command::BoxError;
use command::Command;
use command::CommandRegistry;
use command::Entry;
use command::Loaded;
use herald::Context;
use herald::Gateway;
use herald::Handler;
use herald::commands;
use herald::console;
use herald::gateway::Outbound;
use interaction::Id;
use reply::Reply;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;

async fn start() -> TcpStream {
	let handler = Arc::new(Handler::new(Arc::new(commands::registry())));
	let gateway = Gateway::bind("127.0.0.1:0", handler).await.unwrap();
	let addr = gateway.local_addr().unwrap();
	tokio::spawn(gateway.run());
	TcpStream::connect(addr).await.unwrap()
}

#[tokio::test]
async fn test_gateway_round_trip() {
	let stream = start().await;
	let (read_half, mut write_half) = stream.into_split();
	let mut lines = BufReader::new(read_half).lines();

	write_half
		.write_all(b"{\"id\": \"7\", \"type\": 2, \"data\": {\"name\": \"debug\"}}\n")
		.await
		.unwrap();

	let line = lines.next_line().await.unwrap().unwrap();
	let message: Outbound = serde_json::from_str(&line).unwrap();
	assert_eq!(
		message,
		Outbound::Reply {
			interaction_id: Id(7),
			reply: Reply::text("Test"),
		}
	);
}

#[tokio::test]
async fn test_gateway_reports_malformed_lines() {
	let stream = start().await;
	let (read_half, mut write_half) = stream.into_split();
	let mut lines = BufReader::new(read_half).lines();

	write_half.write_all(b"\n{not json}\n").await.unwrap();

	let line = lines.next_line().await.unwrap().unwrap();
	let message: Outbound = serde_json::from_str(&line).unwrap();
	assert!(matches!(message, Outbound::Error { .. }));
}

#[tokio::test]
async fn test_gateway_answers_autocomplete() {
	let stream = start().await;
	let (read_half, mut write_half) = stream.into_split();
	let mut lines = BufReader::new(read_half).lines();

	let request = serde_json::json!({
		"id": "9",
		"type": 4,
		"data": {
			"name": "random",
			"options": [{"name": "rand", "type": 10, "value": "", "focused": true}]
		}
	});
	write_half
		.write_all(format!("{}\n", request).as_bytes())
		.await
		.unwrap();

	let line = lines.next_line().await.unwrap().unwrap();
	match serde_json::from_str::<Outbound>(&line).unwrap() {
		Outbound::Autocomplete {
			interaction_id,
			choices,
		} => {
			assert_eq!(interaction_id, Id(9));
			assert_eq!(choices.len(), 10);
		}
		other => panic!("unexpected message {:?}", other),
	}
}

#[tokio::test]
async fn test_console_reload_runs_teardowns_until_quit() {
	let builds = Arc::new(AtomicUsize::new(0));
	let teardowns = Arc::new(AtomicUsize::new(0));

	let registry = CommandRegistry::new();
	{
		let builds = builds.clone();
		let teardowns = teardowns.clone();
		registry.add(Entry::new("probe", move |name: String| {
			let builds = builds.clone();
			let teardowns = teardowns.clone();
			async move {
				builds.fetch_add(1, Ordering::SeqCst);
				let command = Command::builder(name, "Probe.")
					.executor(|_ctx: Context, _args: Args| async { Ok::<(), BoxError>(()) })
					.build()?;
				Ok::<Loaded<Context>, BoxError>(Loaded::new(command).with_teardown(
					move || async move {
						teardowns.fetch_add(1, Ordering::SeqCst);
						Ok::<(), BoxError>(())
					},
				))
			}
		}));
	}

	registry.get("probe").await.unwrap().unwrap();
	console::run(&b"reload\n\nbogus\nq\nreload\n"[..], &registry)
		.await
		.unwrap();

	assert_eq!(teardowns.load(Ordering::SeqCst), 1);

	registry.get("probe").await.unwrap().unwrap();
	assert_eq!(builds.load(Ordering::SeqCst), 2);
}
