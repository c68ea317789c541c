//! # TUI Components
//!
//! All UI pieces for the terminal interface, following two patterns:
//!
//! - **Stateless (props-based)**: `TitleBar`, `MessageView` receive all
//!   data as fields and just render it.
//! - **Stateful (event-driven)**: `InputBox`, `MessageList`,
//!   `ConversationList` keep persistent state in `TuiState` and are
//!   wrapped by a transient struct each frame.
//!
//! Each component file co-locates its state, events, rendering, and tests.

mod conversation_list;
mod input_box;
pub mod message;
mod message_list;
mod title_bar;

pub use conversation_list::{ConversationList, ConversationListState, SidebarEvent};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
