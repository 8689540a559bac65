//! Local interaction gateway.
//!
//! Clients connect over TCP and send one interaction JSON object per line.
//! Everything the bot sends back (replies, edits, follow-ups and
//! autocomplete suggestions) is written to the same connection as JSON
//! lines tagged with the interaction id.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use command::BoxError;
use interaction::Choice;
use interaction::Id;
use interaction::Interaction;
use reply::Reply;
use reply::ReplyError;
use reply::Responder;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::Handler;

/// One message written back to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
	Reply { interaction_id: Id, reply: Reply },
	EditReply { interaction_id: Id, reply: Reply },
	FollowUp { interaction_id: Id, reply: Reply },
	Autocomplete { interaction_id: Id, choices: Vec<Choice> },
	Error { message: String },
}

/// Answers one interaction by queueing messages for its connection.
pub struct LineResponder {
	interaction_id: Id,
	tx: mpsc::UnboundedSender<Outbound>,
}

impl LineResponder {
	pub fn new(interaction_id: Id, tx: mpsc::UnboundedSender<Outbound>) -> Self {
		Self { interaction_id, tx }
	}

	fn send(&self, message: Outbound) -> Result<(), ReplyError> {
		self.tx.send(message).map_err(|_| ReplyError::Closed)
	}
}

#[async_trait]
impl Responder for LineResponder {
	async fn reply(&self, reply: Reply) -> Result<(), ReplyError> {
		self.send(Outbound::Reply {
			interaction_id: self.interaction_id,
			reply,
		})
	}

	async fn edit_reply(&self, reply: Reply) -> Result<(), ReplyError> {
		self.send(Outbound::EditReply {
			interaction_id: self.interaction_id,
			reply,
		})
	}

	async fn follow_up(&self, reply: Reply) -> Result<(), ReplyError> {
		self.send(Outbound::FollowUp {
			interaction_id: self.interaction_id,
			reply,
		})
	}
}

pub struct Gateway {
	listener: TcpListener,
	handler: Arc<Handler>,
}

impl Gateway {
	pub async fn bind(addr: &str, handler: Arc<Handler>) -> Result<Self, BoxError> {
		let listener = TcpListener::bind(addr).await?;
		Ok(Self { listener, handler })
	}

	pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
		self.listener.local_addr()
	}

	pub async fn run(self) -> Result<(), BoxError> {
		info!("Herald gateway listening on {}", self.local_addr()?);

		loop {
			match self.listener.accept().await {
				Ok((socket, addr)) => {
					debug!("New client connected from {}", addr);
					let handler = self.handler.clone();

					tokio::spawn(async move {
						if let Err(e) = handle_client(socket, handler).await {
							error!("Error handling client {}: {}", addr, e);
						}
					});
				}
				Err(e) => {
					error!("Error accepting connection: {}", e);
				}
			}
		}
	}
}

async fn handle_client(socket: TcpStream, handler: Arc<Handler>) -> Result<(), BoxError> {
	let (read_half, mut write_half) = socket.into_split();
	let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();

	// Serializes writes from all interactions on this connection.
	let writer = tokio::spawn(async move {
		while let Some(message) = rx.recv().await {
			let mut line = serde_json::to_vec(&message)?;
			line.push(b'\n');
			write_half.write_all(&line).await?;
		}
		Ok::<(), BoxError>(())
	});

	let mut lines = BufReader::new(read_half).lines();
	loop {
		let line = match lines.next_line().await {
			Ok(Some(line)) => line,
			Ok(None) => break,
			Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
				debug!("Connection reset by peer");
				break;
			}
			Err(e) => return Err(e.into()),
		};
		if line.trim().is_empty() {
			continue;
		}

		let interaction = match Interaction::parse(&line) {
			Ok(interaction) => interaction,
			Err(e) => {
				warn!(error = %e, "Rejected malformed interaction");
				let _ = tx.send(Outbound::Error {
					message: e.to_string(),
				});
				continue;
			}
		};

		let handler = handler.clone();
		let tx = tx.clone();
		tokio::spawn(async move {
			let interaction_id = interaction.id;
			let responder = Arc::new(LineResponder::new(interaction_id, tx.clone()));
			if let Some(response) = handler.handle(interaction, responder).await {
				let _ = tx.send(Outbound::Autocomplete {
					interaction_id,
					choices: response.choices,
				});
			}
		});
	}

	// The writer finishes once every in-flight interaction has answered.
	drop(tx);
	writer.await?
}
