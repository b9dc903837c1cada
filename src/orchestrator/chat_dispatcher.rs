//! Chat dispatch - orchestration layer
//!
//! Maps incoming updates onto the conversation state machine:
//! /start → ask school → ask questions → generate → deliver → teardown.
//! One update is handled at a time; a failed chat never affects the next.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::api::TelegramClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, ExtractError};
use crate::models::{Message, Update};
use crate::orchestrator::session_store::{SessionState, SessionStore};
use crate::workflow::{ExamCtx, ExamFlow};

// ========== User-facing messages ==========

const MSG_WELCOME: &str = "🎓 أهلاً بك في بوت إنشاء نماذج الامتحانات!\n\n\
📝 سأساعدك في إنشاء نموذج امتحان بصيغة PDF.\n\n\
أولاً، ما هو اسم مدرستك؟ (أرسل - لتخطي هذه الخطوة)";

const MSG_ASK_QUESTIONS: &str = "ممتاز! الآن أرسل لي أسئلة الامتحان:\n\n\
📖 مثال:\n\
1. ما هي عاصمة العراق؟\n\
2. كم عدد محافظات العراق؟\n\
3. اذكر ثلاثة أنهار في العراق.\n\n\
يمكنك إرسال جميع الأسئلة في رسالة واحدة،\n\
ويمكنك إضافة أسطر مثل \"العنوان: ...\" و \"الوقت: ...\"";

const MSG_PROCESSING: &str = "🔄 جاري إنشاء نموذج الامتحان...";

const MSG_DONE: &str = "✅ تم إنشاء نموذج الامتحان بنجاح!";

const MSG_CANCELED: &str = "تم الإلغاء. يمكنك البدء مرة أخرى بـ /start";

const MSG_HINT_START: &str = "أرسل /start لبدء إنشاء نموذج امتحان جديد";

const MSG_HELP: &str = "📖 كيفية استخدام البوت:\n\n\
/start - بدء إنشاء نموذج امتحان\n\
/cancel - إلغاء المحادثة الحالية\n\
/help - عرض هذه الرسالة\n\n\
✨ المميزات:\n\
- إنشاء نماذج امتحانات PDF\n\
- دعم النص العربي\n\
- إضافة اسم المدرسة والعنوان والوقت";

const MSG_ERR_EMPTY: &str = "❌ لم أجد أي نص أسئلة في رسالتك، حاول مرة أخرى بـ /start";

const MSG_ERR_NO_QUESTIONS: &str = "❌ لم يتم العثور على أسئلة صحيحة، حاول مرة أخرى بـ /start";

const MSG_ERR_INTERNAL: &str = "❌ حدث خطأ أثناء إنشاء الملف";

/// Chat dispatcher
///
/// Responsibilities:
/// - command handling (/start, /cancel, /help)
/// - session transitions (school → questions)
/// - invoking the exam flow and delivering the artifact
pub struct ChatDispatcher {
    client: TelegramClient,
    flow: ExamFlow,
    sessions: SessionStore,
    ministry: String,
}

impl ChatDispatcher {
    pub fn new(client: TelegramClient, config: &Config) -> Self {
        Self {
            client,
            flow: ExamFlow::new(config),
            sessions: SessionStore::new(Duration::from_secs(config.session_timeout_secs)),
            ministry: config.ministry_name.clone(),
        }
    }

    /// Handle one incoming update; errors are reported, never propagated
    pub async fn dispatch(&mut self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let chat_id = message.chat.id;
        let Some(text) = message.trimmed_text().map(str::to_string) else {
            return;
        };

        if let Err(e) = self.handle_text(chat_id, &message, &text).await {
            error!("[chat {}] ❌ dispatch failed: {}", chat_id, e);
            if let Err(send_err) = self.client.send_message(chat_id, MSG_ERR_INTERNAL).await {
                warn!("[chat {}] could not report failure: {}", chat_id, send_err);
            }
        }
    }

    async fn handle_text(&mut self, chat_id: i64, message: &Message, text: &str) -> AppResult<()> {
        match text {
            "/start" => {
                self.sessions.open(chat_id);
                return self.client.send_message(chat_id, MSG_WELCOME).await;
            }
            "/cancel" => {
                self.sessions.close(chat_id);
                return self.client.send_message(chat_id, MSG_CANCELED).await;
            }
            "/help" => {
                return self.client.send_message(chat_id, MSG_HELP).await;
            }
            _ => {}
        }

        match self.sessions.get_mut(chat_id).map(|s| s.state) {
            Some(SessionState::AwaitingSchool) => {
                if let Some(session) = self.sessions.get_mut(chat_id) {
                    session.school = (text != "-").then(|| text.to_string());
                    session.state = SessionState::AwaitingQuestions;
                    session.touch();
                }
                self.client.send_message(chat_id, MSG_ASK_QUESTIONS).await
            }
            Some(SessionState::AwaitingQuestions) => {
                self.run_generation(chat_id, message, text).await
            }
            None => self.client.send_message(chat_id, MSG_HINT_START).await,
        }
    }

    /// Generate the exam and deliver it; the session is torn down whether
    /// generation succeeds or not
    async fn run_generation(&mut self, chat_id: i64, message: &Message, raw: &str) -> AppResult<()> {
        self.client.send_message(chat_id, MSG_PROCESSING).await?;

        let school = self
            .sessions
            .get_mut(chat_id)
            .and_then(|session| session.school.clone());
        self.sessions.close(chat_id);

        let ctx = ExamCtx::new(chat_id, &self.ministry).with_school_override(school);

        match self.flow.generate(raw, &ctx).await {
            Ok(artifact) => {
                let requester = message
                    .from
                    .as_ref()
                    .map(|u| u.first_name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "امتحان".to_string());
                let file_name = format!("نموذج_امتحان_{}.pdf", requester);

                info!("[chat {}] 📤 sending {}", chat_id, artifact.file_name());
                self.client
                    .send_document(chat_id, artifact.path(), &file_name, MSG_DONE)
                    .await?;
                // artifact drops here and its file is removed
                Ok(())
            }
            Err(AppError::Extract(e)) => {
                warn!("[chat {}] ⚠️ unusable submission: {}", chat_id, e);
                let reply = match e {
                    ExtractError::EmptyInput => MSG_ERR_EMPTY,
                    ExtractError::NoQuestionsFound => MSG_ERR_NO_QUESTIONS,
                };
                self.client.send_message(chat_id, reply).await
            }
            Err(e) => {
                error!("[chat {}] ❌ generation failed: {}", chat_id, e);
                self.client.send_message(chat_id, MSG_ERR_INTERNAL).await
            }
        }
    }

    /// Drop idle conversations
    pub fn prune_sessions(&mut self) {
        let pruned = self.sessions.prune_stale();
        if pruned > 0 {
            info!("🧹 pruned {} idle sessions", pruned);
        }
    }
}
