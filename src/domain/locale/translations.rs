//! Translation catalogs.

/// Every user-facing string of the chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    pub chat_with: &'static str,
    pub new_chat: &'static str,
    pub clear_chat: &'static str,
    pub start_conversation: &'static str,
    pub user: &'static str,
    pub assistant: &'static str,
    pub attachments: &'static str,
    pub thinking: &'static str,
    pub attach_files: &'static str,
    pub type_message: &'static str,
    pub send: &'static str,
    /// Written into the placeholder whenever a submit fails.
    pub error_message: &'static str,
    /// Written into the placeholder when the relay answered without text.
    pub no_response: &'static str,
    pub ai_chat: &'static str,
    pub chat_with_ai: &'static str,
    pub language: &'static str,
    pub english: &'static str,
    pub russian: &'static str,
}

pub static ENGLISH: Translations = Translations {
    chat_with: "Chat with",
    new_chat: "New Chat",
    clear_chat: "Clear Chat",
    start_conversation: "Start a conversation by sending a message",
    user: "User",
    assistant: "Assistant",
    attachments: "Attachments",
    thinking: "AI is thinking... (this may take a moment)",
    attach_files: "Attach files",
    type_message: "Type your message...",
    send: "Send",
    error_message: "Sorry, there was an error processing your request.",
    no_response: "No response received",
    ai_chat: "AI Chat",
    chat_with_ai: "Chat with AI powered by GPT-4o-mini",
    language: "Language",
    english: "English",
    russian: "Russian",
};

pub static RUSSIAN: Translations = Translations {
    chat_with: "Чат с",
    new_chat: "Новый чат",
    clear_chat: "Очистить чат",
    start_conversation: "Начните разговор, отправив сообщение",
    user: "Пользователь",
    assistant: "Ассистент",
    attachments: "Вложения",
    thinking: "ИИ думает... (это может занять некоторое время)",
    attach_files: "Прикрепить файлы",
    type_message: "Введите ваше сообщение...",
    send: "Отправить",
    error_message: "Извините, произошла ошибка при обработке вашего запроса.",
    no_response: "Ответ не получен",
    ai_chat: "ИИ Чат",
    chat_with_ai: "Общайтесь с ИИ на базе GPT-4o-mini",
    language: "Язык",
    english: "Английский",
    russian: "Русский",
};
