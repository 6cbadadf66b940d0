//! `<!-- br: -->` directive.

use super::{Directive, DirectiveError};
use crate::notebook::Notebook;

/// Comment written between consecutive markup cells.
pub(crate) const BR_COMMENT: &str = "<!-- br: -->";

/// Cell break marker.
///
/// Renders nothing. Its only job is to stand between two runs of text so
/// they become separate markup cells instead of being merged into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrDirective;

impl Directive for BrDirective {
    fn key(&self) -> &str {
        "br"
    }

    fn render(&self, _notebook: &mut Notebook, _payload: &str) -> Result<(), DirectiveError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_br_ignores_payload() {
        let mut notebook = Notebook::new();
        BrDirective.render(&mut notebook, "").unwrap();
        BrDirective.render(&mut notebook, "{not json").unwrap();
        assert_eq!(notebook, Notebook::new());
    }
}
