use derive_more::{Display, Error};

/// Errors raised while building payloads or verifying webhook requests.
///
/// Every variant carries the field name and limit that failed, so the
/// rendered message is self-describing without inspecting source.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A hard character limit was exceeded.
    #[display("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A collection exceeded its maximum size.
    #[display("you cannot have more than {max} {what}")]
    TooMany { what: &'static str, max: usize },

    /// A collection was below its minimum size.
    #[display("at least {min} {what} are required")]
    TooFew { what: &'static str, min: usize },

    /// A string did not match any of the allowed values for a field.
    #[display("invalid {field} provided: {value}")]
    InvalidValue {
        field: &'static str,
        value: String,
    },

    /// The default action of an element carried a title.
    #[display("the default_action button may not have a title")]
    DefaultActionWithTitle,

    /// The default action of an element was not a web_url button.
    #[display("the default_action button must be of type web_url")]
    DefaultActionNotWebUrl,

    /// A media template was built from an attachment that is neither an
    /// image nor a video.
    #[display("media templates only accept image or video attachments")]
    InvalidMediaType,

    /// The attachment cannot be uploaded for reuse.
    #[display("attachment uploads require a url and must not carry quick replies")]
    NotUploadable,

    /// The webhook verification request did not match the configured token.
    #[display("verify token does not match")]
    VerifyTokenMismatch,
}
