//! Assistant chat panel state

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub transcript: Vec<ChatTurn>,
    pub input: String,
    /// Prompt waiting for a reply
    pub pending: Option<String>,
    pub error: Option<String>,
}

impl ChatState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the typed prompt for sending; `None` when blank or busy
    pub fn take_prompt(&mut self) -> Option<String> {
        if self.is_pending() || self.input.trim().is_empty() {
            return None;
        }
        let prompt = std::mem::take(&mut self.input).trim().to_string();
        self.pending = Some(prompt.clone());
        self.error = None;
        Some(prompt)
    }

    /// Record the outcome of the pending prompt
    ///
    /// A failed prompt goes back into the input box unless something new has
    /// been typed since.
    pub fn finish(&mut self, result: Result<String, String>) {
        let Some(prompt) = self.pending.take() else {
            return;
        };
        match result {
            Ok(reply) => {
                self.transcript.push(ChatTurn {
                    role: ChatRole::User,
                    text: prompt,
                });
                self.transcript.push(ChatTurn {
                    role: ChatRole::Assistant,
                    text: reply,
                });
            }
            Err(message) => {
                if self.input.is_empty() {
                    self.input = prompt;
                }
                self.error = Some(message);
            }
        }
    }
}
