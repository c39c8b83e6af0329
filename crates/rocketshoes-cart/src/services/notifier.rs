//! User-facing notifications (the storefront's toast messages).

use std::fmt::Display;

use tracing::warn;

/// The fixed set of messages the cart shows to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested quantity is more than the available stock.
    StockExceeded,
    /// The product has no stock at all.
    OutOfStock,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed (usually: it was not in the cart).
    RemoveFailed,
    /// Changing a quantity failed for any other reason.
    UpdateFailed,
}

impl Notice {
    /// The storefront's (pt-BR) message text.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::StockExceeded => "Quantidade solicitada fora de estoque",
            Notice::OutOfStock => "Produto sem estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Fire-and-forget sink for [`Notice`]s.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: writes each notice to the log at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(?notice, message = notice.message(), "Cart notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_fixed() {
        assert_eq!(
            Notice::StockExceeded.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(Notice::OutOfStock.to_string(), "Produto sem estoque");
        assert_eq!(Notice::AddFailed.to_string(), "Erro na adição do produto");
        assert_eq!(Notice::RemoveFailed.to_string(), "Erro na remoção do produto");
        assert_eq!(
            Notice::UpdateFailed.to_string(),
            "Erro na alteração de quantidade do produto"
        );
    }
}
