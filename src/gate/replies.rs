//! Reply texts and keyboard descriptors the gate hands to the transport

/// Label of the button that asks Telegram to share the user's contact
pub const SHARE_CONTACT_LABEL: &str = "📱 Поделиться контактом";

/// Label of the opt-out button; an incoming text equal to it is an opt-out
pub const OPT_OUT_LABEL: &str = "❌ Не хочу делиться";

pub const PROMPT_TEXT: &str = "Привет! Чтобы продолжить, нажми кнопку и поделись контактом.";
pub const ALREADY_REGISTERED_TEXT: &str = "С возвращением! Контакт уже сохранён ✅";
pub const NOT_OWN_CONTACT_TEXT: &str = "Нужно отправить *свой* контакт через кнопку ниже.";
pub const OPT_OUT_TEXT: &str = "Ок, без номера тоже можно, но часть функций будет недоступна.";
pub const BLOCKED_TEXT: &str = "Чтобы пользоваться ботом, нужно сначала поделиться номером телефона 👇";

pub fn saved_text(phone: &str) -> String {
    format!("Спасибо! Номер сохранён: {} ✅", phone)
}

/// One reply-keyboard button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Pressing it shares the user's own contact instead of sending the label
    pub requests_contact: bool,
}

impl Button {
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            requests_contact: false,
        }
    }

    pub fn contact(label: &str) -> Self {
        Self {
            label: label.to_string(),
            requests_contact: true,
        }
    }
}

/// What happens to the user's reply keyboard along with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Show these rows of buttons (resized, one-time)
    Buttons(Vec<Vec<Button>>),
    /// Hide the reply keyboard
    Remove,
}

impl Keyboard {
    /// Share-contact button above the opt-out button
    pub fn contact_request() -> Self {
        Keyboard::Buttons(vec![
            vec![Button::contact(SHARE_CONTACT_LABEL)],
            vec![Button::text(OPT_OUT_LABEL)],
        ])
    }
}

/// A message the transport should send back to the user's chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn prompt() -> Self {
        Self::new(PROMPT_TEXT, Keyboard::contact_request())
    }

    pub fn already_registered() -> Self {
        Self::new(ALREADY_REGISTERED_TEXT, Keyboard::Remove)
    }

    pub fn not_own_contact() -> Self {
        Self::new(NOT_OWN_CONTACT_TEXT, Keyboard::contact_request())
    }

    pub fn saved(phone: &str) -> Self {
        Self::new(saved_text(phone), Keyboard::Remove)
    }

    pub fn opted_out() -> Self {
        Self::new(OPT_OUT_TEXT, Keyboard::Remove)
    }

    pub fn blocked() -> Self {
        Self::new(BLOCKED_TEXT, Keyboard::contact_request())
    }
}
