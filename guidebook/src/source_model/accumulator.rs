//! Block accumulation
//!
//! Consecutive lines of the same kind are coalesced into one block.
//! The accumulator owns the fence state and three buffers (paragraph,
//! list, code). At most one buffer holds content at any time: every
//! operation that starts filling a buffer first releases whichever other
//! buffer is open, and returns it as a finished [`PendingBlock`].

use super::blocks::ListVariant;

/// A finished block that still needs an id and a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingBlock {
    Paragraph(String),
    List {
        variant: ListVariant,
        items: Vec<String>,
    },
    Code {
        language: Option<String>,
        content: String,
    },
}

/// Whether a code fence is open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FenceState {
    #[default]
    Outside,
    Inside { language: Option<String> },
}

/// List items collected so far
#[derive(Debug)]
struct ListBuffer {
    variant: ListVariant,
    items: Vec<String>,
}

/// Buffers that coalesce lines into blocks
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    fence: FenceState,
    paragraph: Vec<String>,
    list: Option<ListBuffer>,
    code: Vec<String>,
}

impl BlockAccumulator {
    /// Create an accumulator outside any fence with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a code fence is currently open
    pub fn in_fence(&self) -> bool {
        matches!(self.fence, FenceState::Inside { .. })
    }

    /// Toggle the fence state on a delimiter line
    ///
    /// Opening releases any open paragraph or list. Closing releases the
    /// collected code lines; a fence with no lines yields nothing.
    pub fn toggle_fence(&mut self, language: Option<&str>) -> Option<PendingBlock> {
        let released = match std::mem::take(&mut self.fence) {
            FenceState::Inside { language } => self.take_code(language),
            FenceState::Outside => {
                let open = self.flush_open();
                self.fence = FenceState::Inside {
                    language: language.map(str::to_string),
                };
                open
            }
        };
        self.check_invariant();
        released
    }

    /// Append a raw line to the open fence
    pub fn push_code(&mut self, line: &str) {
        self.code.push(line.to_string());
        self.check_invariant();
    }

    /// Append a plain text line to the paragraph buffer
    ///
    /// An open list ends here so blocks keep their source order.
    pub fn push_text(&mut self, line: &str) -> Option<PendingBlock> {
        let released = self.take_list();
        self.paragraph.push(line.to_string());
        self.check_invariant();
        released
    }

    /// Append an item to the list buffer of the given variant
    ///
    /// An open paragraph, or an open list of the other variant, is
    /// released first.
    pub fn push_list_item(&mut self, variant: ListVariant, item: &str) -> Option<PendingBlock> {
        let released = match self.list.as_ref().map(|list| list.variant) {
            Some(open) if open == variant => None,
            Some(_) => self.take_list(),
            None => self.take_paragraph(),
        };

        self.list
            .get_or_insert_with(|| ListBuffer {
                variant,
                items: Vec::new(),
            })
            .items
            .push(item.to_string());
        self.check_invariant();
        released
    }

    /// Release the open paragraph or list, if any
    ///
    /// Called on blank lines, rules and headings.
    pub fn flush_open(&mut self) -> Option<PendingBlock> {
        // Only one of the two can hold content
        self.take_paragraph().or_else(|| self.take_list())
    }

    /// Release whatever is still buffered at end of input
    ///
    /// An unterminated fence still yields its collected code.
    pub fn finish(&mut self) -> Option<PendingBlock> {
        match std::mem::take(&mut self.fence) {
            FenceState::Inside { language } => self.take_code(language),
            FenceState::Outside => self.flush_open(),
        }
    }

    /// Number of buffers currently holding content
    pub fn open_buffers(&self) -> usize {
        usize::from(!self.paragraph.is_empty())
            + usize::from(self.list.is_some())
            + usize::from(!self.code.is_empty())
    }

    fn take_paragraph(&mut self) -> Option<PendingBlock> {
        if self.paragraph.is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.paragraph).join(" ");
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        Some(PendingBlock::Paragraph(content.to_string()))
    }

    fn take_list(&mut self) -> Option<PendingBlock> {
        self.list.take().map(|list| PendingBlock::List {
            variant: list.variant,
            items: list.items,
        })
    }

    fn take_code(&mut self, language: Option<String>) -> Option<PendingBlock> {
        if self.code.is_empty() {
            return None;
        }
        Some(PendingBlock::Code {
            language,
            content: std::mem::take(&mut self.code).join("\n"),
        })
    }

    fn check_invariant(&self) {
        debug_assert!(
            self.open_buffers() <= 1,
            "more than one block buffer open: {:?}",
            self
        );
        debug_assert!(
            self.code.is_empty() || self.in_fence(),
            "code buffered outside a fence"
        );
    }
}
