use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use thiserror::Error;

use super::context::build_request_turns;
use super::session::{ChatSessionManager, SessionError};
use super::settings::SettingsService;
use super::store::ChatStore;
use crate::models::{Chat, Message, Preferences, Role, Status};
use crate::providers::{ChatRequest, CompletionProvider};
use crate::voice::{VoiceBridge, VoiceError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("A request is already in flight")]
    Busy,
}

/// Drives the session: owns the chat collection (behind a mutex, so host
/// threads never observe a half-updated collection), the loaded
/// preferences, the durable store, and the request lifecycle.
///
/// One send is in flight at a time; a second send is rejected, not queued.
/// Request failures surface as assistant turns in the log plus an error
/// status, never as a crashed session.
pub struct ChatClient {
    store: ChatStore,
    provider: Arc<dyn CompletionProvider>,
    voice: Arc<dyn VoiceBridge>,
    session: Mutex<ChatSessionManager>,
    prefs: Mutex<Preferences>,
    status: Mutex<Status>,
    in_flight: AtomicBool,
    voice_output: AtomicBool,
}

impl ChatClient {
    /// Load preferences and any persisted chats from the store. The most
    /// recent persisted chat becomes active.
    pub async fn new(
        store: ChatStore,
        provider: Arc<dyn CompletionProvider>,
        voice: Arc<dyn VoiceBridge>,
    ) -> Result<Self> {
        let prefs = SettingsService::load(&store).await;
        let chats = store
            .load_chats()
            .await
            .context("Failed to load chat history")?;

        Ok(Self {
            session: Mutex::new(ChatSessionManager::from_saved(chats)),
            prefs: Mutex::new(prefs),
            status: Mutex::new(Status::ready()),
            in_flight: AtomicBool::new(false),
            voice_output: AtomicBool::new(false),
            store,
            provider,
            voice,
        })
    }

    /// Submit one user turn and wait for the assistant reply.
    ///
    /// Blank input is ignored. If no chat is active, one is created and its
    /// id used in the same locked step, so the first message of a session is
    /// never dropped and no duplicate chat appears. A provider failure is
    /// recorded as a visible assistant turn and an error status; it is not
    /// an `Err` here.
    pub async fn send(&self, input: &str) -> Result<(), SendError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(());
        }

        let (api_key, model, context_enabled) = {
            let prefs = self.prefs.lock().unwrap();
            (
                prefs.api_key.clone(),
                prefs.model.clone(),
                prefs.context_enabled,
            )
        };
        if api_key.is_empty() {
            self.set_status(Status::error("Please set your API key in settings"));
            return Err(SendError::MissingCredential);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SendError::Busy);
        }

        self.run_send(text, api_key, model, context_enabled).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn run_send(&self, text: &str, api_key: String, model: String, context_enabled: bool) {
        // Resolve the target chat, append the user turn, and assemble the
        // outbound context in one locked step. The resolved id, not the
        // active pointer, is where the reply will land.
        let (chat_id, turns) = {
            let mut session = self.session.lock().unwrap();
            let chat_id = session.ensure_active_chat();
            if let Err(e) = session.append_to(&chat_id, Role::User, text) {
                tracing::error!("Failed to append user turn: {e}");
                return;
            }
            session.derive_title_if_unset(&chat_id, text);

            let log = session.get(&chat_id).map(|c| c.messages.clone()).unwrap_or_default();
            (chat_id, build_request_turns(&log, context_enabled))
        };

        self.set_status(Status::loading("Thinking..."));
        self.persist().await;

        let request = ChatRequest {
            api_key,
            model,
            turns,
        };

        match self.provider.complete(request).await {
            Ok(reply) => {
                self.append_reply(&chat_id, &reply);
                self.set_status(Status::ready());
                self.persist().await;

                if self.voice_output.load(Ordering::SeqCst) && self.voice.capabilities().synthesis {
                    self.voice.speak(&reply);
                }
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::error!("Completion request failed: {reason}");
                self.append_reply(&chat_id, &format!("Error: {reason}"));
                self.set_status(Status::error(format!("Error: {reason}")));
                self.persist().await;
            }
        }
    }

    /// Write the assistant turn into the chat it belongs to. If the user
    /// deleted that chat while the request was outstanding, the reply is
    /// dropped rather than misattributed.
    fn append_reply(&self, chat_id: &str, content: &str) {
        let mut session = self.session.lock().unwrap();
        if session.append_to(chat_id, Role::Assistant, content).is_err() {
            tracing::debug!("Dropping reply for deleted chat {chat_id}");
        }
    }

    /// Create a new empty chat and make it active.
    pub async fn new_chat(&self) -> String {
        let id = self.session.lock().unwrap().create_chat();
        self.persist().await;
        id
    }

    pub fn switch_chat(&self, id: &str) -> Result<(), SessionError> {
        self.session.lock().unwrap().switch_to(id)
    }

    pub async fn delete_chat(&self, id: &str) {
        self.session.lock().unwrap().delete_chat(id);
        self.persist().await;
    }

    /// Empty the active chat and reset its title.
    pub async fn clear_active_chat(&self) {
        self.session.lock().unwrap().clear_active_chat();
        self.set_status(Status::ready());
        self.persist().await;
    }

    /// Replace the preferences wholesale and write them through. Turning
    /// persistence off deletes the stored history (nothing survives a
    /// restart); turning it on writes the current collection in full.
    pub async fn save_preferences(&self, prefs: Preferences) -> Result<()> {
        *self.prefs.lock().unwrap() = prefs.clone();
        SettingsService::save(&self.store, &prefs).await?;

        if prefs.persistence_enabled {
            self.persist().await;
        } else {
            self.store.delete_chats().await?;
        }
        Ok(())
    }

    pub fn set_voice_output(&self, enabled: bool) {
        self.voice_output.store(enabled, Ordering::SeqCst);
    }

    pub fn voice_output(&self) -> bool {
        self.voice_output.load(Ordering::SeqCst)
    }

    /// Capture one spoken utterance for the input buffer. Status shows
    /// "Listening..." while the capture runs.
    pub async fn listen(&self) -> Result<String, VoiceError> {
        if !self.voice.capabilities().recognition {
            return Err(VoiceError::Unavailable);
        }

        self.set_status(Status::loading("Listening..."));
        match self.voice.listen_once().await {
            Ok(transcript) => {
                self.set_status(Status::ready());
                Ok(transcript)
            }
            Err(e) => {
                self.set_status(Status::error("Voice recognition error"));
                Err(e)
            }
        }
    }

    pub fn stop_listening(&self) {
        self.voice.stop();
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.session.lock().unwrap().chats().to_vec()
    }

    pub fn active_chat_id(&self) -> Option<String> {
        self.session.lock().unwrap().active_id().map(String::from)
    }

    /// Message log of the active chat.
    pub fn messages(&self) -> Vec<Message> {
        self.session.lock().unwrap().active_messages().to_vec()
    }

    pub fn status(&self) -> Status {
        self.status.lock().unwrap().clone()
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs.lock().unwrap().clone()
    }

    fn set_status(&self, status: Status) {
        *self.status.lock().unwrap() = status;
    }

    /// Mirror the collection to the store when persistence is on. Store
    /// failures are logged, never fatal to the session.
    async fn persist(&self) {
        if !self.prefs.lock().unwrap().persistence_enabled {
            return;
        }
        let chats = self.session.lock().unwrap().chats().to_vec();
        if let Err(e) = self.store.save_chats(&chats).await {
            tracing::error!("Failed to persist chat history: {e}");
        }
    }
}
