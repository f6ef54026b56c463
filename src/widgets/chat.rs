use crate::error::StateError;
use crate::gateway::ChatResponder;
use crate::state::toggle::DisclosureAction;
use crate::state::{Disclosure, Reducer};

pub const GREETING: &str = "Hello! Welcome to TuskPHP support. How can I help you today?";
pub const AGENT_NAME: &str = "Sarah";
pub const MAX_INPUT: usize = 500;

pub const QUICK_MESSAGES: &[(&str, &str)] = &[
    ("🔧 Installation Help", "I need help with installation"),
    ("💳 Billing Support", "I have a billing question"),
    ("🐛 Report Bug", "I found a bug"),
    ("📚 Documentation", "I need documentation"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Visitor,
    Agent,
}

impl Sender {
    pub fn avatar(self) -> &'static str {
        match self {
            Self::Visitor => "👤",
            Self::Agent => "👩‍💼",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Visitor => "user",
            Self::Agent => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Window(DisclosureAction),
    /// Text typed into the input box
    Input(String),
    /// Send whatever is in the input box
    Send,
    /// Fill the input with a canned question and send it
    Quick(usize),
    Replied(Result<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveChat {
    window: Disclosure,
    log: Vec<ChatMessage>,
    input: String,
    /// Messages still waiting for a reply
    typing: usize,
}

impl Default for LiveChat {
    fn default() -> Self {
        Self {
            // The widget starts expanded
            window: Disclosure::default().reduce(DisclosureAction::Open),
            log: vec![ChatMessage {
                sender: Sender::Agent,
                text: GREETING.to_string(),
            }],
            input: String::new(),
            typing: 0,
        }
    }
}

impl LiveChat {
    pub fn window(&self) -> &Disclosure {
        &self.window
    }

    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_typing(&self) -> bool {
        self.typing > 0
    }

    /// Post the input as a visitor message. Returns the text that needs a
    /// reply, or `None` when the input was blank.
    pub fn take_outgoing(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        self.input.clear();
        if text.is_empty() {
            return None;
        }
        self.log.push(ChatMessage {
            sender: Sender::Visitor,
            text: text.clone(),
        });
        self.typing += 1;
        Some(text)
    }

    /// Send the current input and wait for the responder.
    pub async fn send(&mut self, responder: &dyn ChatResponder) -> Result<(), StateError> {
        let Some(text) = self.take_outgoing() else {
            return Ok(());
        };
        let reply = responder.reply(&text).await.map_err(|e| e.to_string());
        self.apply(ChatAction::Replied(reply))
    }
}

impl Reducer for LiveChat {
    type Action = ChatAction;

    fn apply(&mut self, action: ChatAction) -> Result<(), StateError> {
        match action {
            ChatAction::Window(a) => self.window.apply(a)?,
            ChatAction::Input(text) => self.input = text.chars().take(MAX_INPUT).collect(),
            ChatAction::Send => {
                self.take_outgoing();
            }
            ChatAction::Quick(i) => {
                let (_, text) = QUICK_MESSAGES.get(i).ok_or(StateError::OutOfRange {
                    kind: "quick message",
                    index: i,
                    len: QUICK_MESSAGES.len(),
                })?;
                self.input = text.to_string();
                self.take_outgoing();
            }
            ChatAction::Replied(reply) => {
                self.typing = self.typing.saturating_sub(1);
                let text = match reply {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!("Chat reply failed: {}", e);
                        "Sorry, we couldn't reach an agent. Please try again.".to_string()
                    }
                };
                self.log.push(ChatMessage {
                    sender: Sender::Agent,
                    text,
                });
            }
        }
        Ok(())
    }
}
