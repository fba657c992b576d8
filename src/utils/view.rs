use rocket::request::FlashMessage;
use rocket::serde::json::Json;
use serde::Serialize;

/// A flash message carried over from the previous redirect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

/// Display model handed to the browser: the page data plus any pending notice.
#[derive(Debug, Serialize)]
pub struct View<T: Serialize> {
    pub notice: Option<Notice>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> View<T> {
    pub fn new(flash: Option<FlashMessage<'_>>, data: T) -> Json<Self> {
        let notice = flash.map(|flash| Notice {
            kind: flash.kind().to_string(),
            message: flash.message().to_string(),
        });
        Json(View { notice, data })
    }
}

/// Page data for views that only show a prompt or a form.
#[derive(Debug, Serialize)]
pub struct Page {
    pub page: &'static str,
}

impl Page {
    pub fn named(page: &'static str) -> Self {
        Page { page }
    }
}
