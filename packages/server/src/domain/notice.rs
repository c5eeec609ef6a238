//! Notices: server -> client events in domain form.
//!
//! The transport layer decides how a notice is encoded on the wire.

use super::{
    entity::Stats,
    value_object::{ClientId, MessageText, SignalPayload},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// First event on every connection: the client's own id.
    Connected { client_id: ClientId },
    /// A pair was formed. Exactly one side has `initiator = true`.
    PartnerFound {
        partner_id: ClientId,
        initiator: bool,
    },
    /// Handshake data from the partner, untouched.
    Signal {
        from: ClientId,
        payload: SignalPayload,
    },
    /// Chat text from the partner.
    Message { text: MessageText },
    /// The partner is typing.
    Typing,
    /// The partner left; the receiver is unpaired and not searching.
    PartnerDisconnected,
    /// Population figures.
    Stats(Stats),
}

impl Notice {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::Connected { .. } => "connected",
            Notice::PartnerFound { .. } => "partnerFound",
            Notice::Signal { .. } => "signal",
            Notice::Message { .. } => "message",
            Notice::Typing => "typing",
            Notice::PartnerDisconnected => "partnerDisconnected",
            Notice::Stats(_) => "stats",
        }
    }
}
