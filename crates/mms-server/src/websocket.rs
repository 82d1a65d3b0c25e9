//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected browsers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// Full page reload
    Reload,

    /// The last rebuild failed; the previous output is still served
    BuildFailed {
        /// Error description
        message: String,
    },

    /// Connection established
    Connected,
}

/// Hub for broadcasting reload messages to all connected clients.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: HmrMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    /// Subscribe to messages.
    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for the next message for one client.
///
/// A client that fell behind skips what it missed; only a closed hub ends it.
pub async fn next_message(rx: &mut broadcast::Receiver<HmrMessage>) -> Option<HmrMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Live reload client skipped {} messages", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

/// Client-side reload script. Connects back to the serving host.
pub fn hmr_client_script(path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{}');

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);

    switch (msg.type) {{
      case 'reload':
        location.reload();
        break;

      case 'build_failed':
        console.error('[mms] Rebuild failed:', msg.message);
        break;

      case 'connected':
        console.log('[mms] Live reload connected');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[mms] Live reload disconnected, retrying...');
    setTimeout(function() {{ location.reload(); }}, 1000);
  }};
}})();
"#,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_broadcasts_messages() {
        let hub = HmrHub::new();
        let mut rx = hub.subscribe();

        hub.send(HmrMessage::Reload);

        match rx.try_recv() {
            Ok(HmrMessage::Reload) => {}
            other => panic!("Expected Reload message, got {:?}", other),
        }
    }

    #[test]
    fn send_without_subscribers_is_ignored() {
        let hub = HmrHub::new();
        assert_eq!(hub.subscriber_count(), 0);

        hub.send(HmrMessage::Reload);
    }

    #[test]
    fn serializes_messages() {
        let msg = HmrMessage::BuildFailed {
            message: "Invalid catalog YAML".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();

        assert_eq!(
            json,
            r#"{"type":"build_failed","message":"Invalid catalog YAML"}"#
        );
        assert_eq!(
            serde_json::to_string(&HmrMessage::Reload).unwrap(),
            r#"{"type":"reload"}"#
        );
    }

    #[tokio::test]
    async fn lagging_client_keeps_receiving() {
        let (sender, mut rx) = broadcast::channel(1);

        sender.send(HmrMessage::Connected).unwrap();
        sender
            .send(HmrMessage::BuildFailed {
                message: "bad yaml".to_string(),
            })
            .unwrap();
        sender.send(HmrMessage::Reload).unwrap();

        assert_eq!(next_message(&mut rx).await, Some(HmrMessage::Reload));

        drop(sender);
        assert_eq!(next_message(&mut rx).await, None);
    }

    #[test]
    fn client_script_uses_path() {
        let script = hmr_client_script("/__hmr");
        assert!(script.contains("location.host + '/__hmr'"));
    }
}
