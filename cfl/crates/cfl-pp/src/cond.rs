//! Conditional compilation state.
//!
//! `#ifdef`/`#ifndef` push a frame, `#else` flips it, `#endif` pops it.
//! Each frame is in one of three states:
//!
//! ```text
//!              #else                       #else
//!   Waiting ----------> Active ----------> BranchTaken
//!   (cond false)        (cond true)        (nothing more emitted)
//! ```
//!
//! A frame opened while its enclosing frame is not active starts out as
//! `InactiveBranchTaken` and never becomes active. The stack always holds
//! an implicit, always-active root frame.
//!
//! Operations that close or flip frames take a `floor`: the number of
//! frames that belong to outer files. An included file can only touch the
//! frames it opened itself.

use cfl_lex::Token;
use thiserror::Error;
use tracing::trace;

/// State of one conditional frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Tokens are emitted.
    Active,
    /// Suppressed; a later `#else` may activate the frame.
    InactiveWaitingForBranch,
    /// Suppressed for the rest of the frame.
    InactiveBranchTaken,
}

impl FrameState {
    /// Returns true for [`FrameState::Active`].
    pub fn is_active(self) -> bool {
        self == FrameState::Active
    }
}

/// One open conditional block.
#[derive(Clone, Debug)]
pub struct Frame {
    state: FrameState,
    saw_else: bool,
    opener: Option<Token>,
}

impl Frame {
    /// Current state.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Returns true once `#else` was seen for this frame.
    pub fn saw_else(&self) -> bool {
        self.saw_else
    }

    /// The directive name token that opened the frame. `None` for the root.
    pub fn opener(&self) -> Option<&Token> {
        self.opener.as_ref()
    }
}

/// Misuse of conditional directives.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalError {
    /// `#else` with no open frame.
    #[error("#else without #ifdef")]
    ElseWithoutIf,
    /// Second `#else` for the same frame.
    #[error("#else after #else")]
    DuplicateElse,
    /// `#elif` with no open frame.
    #[error("#elif without #ifdef")]
    ElifWithoutIf,
    /// `#endif` with no open frame.
    #[error("#endif without #ifdef")]
    EndifWithoutIf,
}

/// Stack of conditional frames over the implicit root.
///
/// # Examples
///
/// ```
/// use cfl_lex::Lexer;
/// use cfl_pp::{ConditionalStack, FrameState};
///
/// let opener = Lexer::lex("ifdef", "x.c").tokens()[0].clone();
/// let mut stack = ConditionalStack::new();
/// stack.push(false, opener);
/// assert!(!stack.is_active());
/// stack.flip_else(0).unwrap();
/// assert_eq!(stack.top_state(), FrameState::Active);
/// stack.pop(0).unwrap();
/// assert_eq!(stack.depth(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ConditionalStack {
    frames: Vec<Frame>,
}

impl Default for ConditionalStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionalStack {
    /// Creates a stack holding only the root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                state: FrameState::Active,
                saw_else: false,
                opener: None,
            }],
        }
    }

    /// Number of open frames, not counting the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// State of the innermost frame.
    pub fn top_state(&self) -> FrameState {
        self.frames
            .last()
            .map_or(FrameState::Active, |frame| frame.state)
    }

    /// Returns true if tokens should currently be emitted.
    pub fn is_active(&self) -> bool {
        self.top_state().is_active()
    }

    /// Opens a frame for a condition that evaluated to `condition`.
    pub fn push(&mut self, condition: bool, opener: Token) {
        let state = match (self.is_active(), condition) {
            (false, _) => FrameState::InactiveBranchTaken,
            (true, true) => FrameState::Active,
            (true, false) => FrameState::InactiveWaitingForBranch,
        };
        self.push_state(state, opener);
    }

    /// Opens a frame that never emits anything.
    pub fn push_suppressed(&mut self, opener: Token) {
        self.push_state(FrameState::InactiveBranchTaken, opener);
    }

    fn push_state(&mut self, state: FrameState, opener: Token) {
        trace!(depth = self.frames.len(), ?state, "push conditional frame");
        self.frames.push(Frame {
            state,
            saw_else: false,
            opener: Some(opener),
        });
    }

    fn top_above(&mut self, floor: usize) -> Option<&mut Frame> {
        if self.depth() > floor {
            self.frames.last_mut()
        } else {
            None
        }
    }

    /// Handles `#else` for the innermost frame above `floor`.
    pub fn flip_else(&mut self, floor: usize) -> Result<FrameState, ConditionalError> {
        let frame = self
            .top_above(floor)
            .ok_or(ConditionalError::ElseWithoutIf)?;
        if frame.saw_else {
            return Err(ConditionalError::DuplicateElse);
        }
        frame.saw_else = true;
        frame.state = match frame.state {
            FrameState::InactiveWaitingForBranch => FrameState::Active,
            FrameState::Active | FrameState::InactiveBranchTaken => {
                FrameState::InactiveBranchTaken
            },
        };
        trace!(state = ?frame.state, "flip conditional frame");
        Ok(frame.state)
    }

    /// Forces the innermost frame above `floor` to stop emitting. Returns
    /// the state it had before.
    pub fn suppress_top(&mut self, floor: usize) -> Result<FrameState, ConditionalError> {
        let frame = self
            .top_above(floor)
            .ok_or(ConditionalError::ElifWithoutIf)?;
        let before = frame.state;
        frame.state = FrameState::InactiveBranchTaken;
        Ok(before)
    }

    /// Handles `#endif` for the innermost frame above `floor`.
    pub fn pop(&mut self, floor: usize) -> Result<Frame, ConditionalError> {
        if self.depth() <= floor {
            return Err(ConditionalError::EndifWithoutIf);
        }
        trace!(depth = self.depth(), "pop conditional frame");
        self.frames.pop().ok_or(ConditionalError::EndifWithoutIf)
    }

    /// Closes every frame above `floor`, returning them innermost last.
    pub fn close_above(&mut self, floor: usize) -> Vec<Frame> {
        let keep = floor + 1;
        if self.frames.len() <= keep {
            return Vec::new();
        }
        self.frames.split_off(keep)
    }
}
