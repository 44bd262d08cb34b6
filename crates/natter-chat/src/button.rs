//! The "new chat" button.
//!
//! Two shapes, one behavior: both shapes run the same [`ChatCreationWorkflow`].
//! Rendering is a pure function of the shape and the loading flag.

use std::fmt;
use std::sync::Arc;

use crate::workflow::{ChatCreationWorkflow, CreateChatOutcome};

pub const CREATE_CHAT_LABEL: &str = "Create a New Chat";
pub const CREATE_CHAT_ICON: &str = "message-square-plus";

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Ghost,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonShape {
    /// Full labelled button, shows a spinner while loading
    Large,
    /// Icon-only ghost button, e.g. for a header bar
    #[default]
    Icon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonContent {
    Label(&'static str),
    Icon(&'static str),
    Spinner,
}

/// Everything a host needs to draw the button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub variant: ButtonVariant,
    pub content: ButtonContent,
    pub disabled: bool,
}

impl fmt::Display for ButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = match self.content {
            ButtonContent::Label(label) => label,
            ButtonContent::Icon(_) => "+",
            ButtonContent::Spinner => "...",
        };
        if self.disabled {
            write!(f, "( {} )", inner)
        } else {
            write!(f, "[ {} ]", inner)
        }
    }
}

/// Render the button for a shape and loading state.
pub fn render(shape: ButtonShape, loading: bool) -> ButtonView {
    match shape {
        ButtonShape::Large => ButtonView {
            variant: ButtonVariant::Primary,
            content: if loading {
                ButtonContent::Spinner
            } else {
                ButtonContent::Label(CREATE_CHAT_LABEL)
            },
            disabled: loading,
        },
        ButtonShape::Icon => ButtonView {
            variant: ButtonVariant::Ghost,
            content: ButtonContent::Icon(CREATE_CHAT_ICON),
            disabled: loading,
        },
    }
}

/// A button bound to a workflow.
#[derive(Clone)]
pub struct CreateChatButton {
    shape: ButtonShape,
    workflow: Arc<ChatCreationWorkflow>,
}

impl CreateChatButton {
    pub fn new(shape: ButtonShape, workflow: Arc<ChatCreationWorkflow>) -> Self {
        Self { shape, workflow }
    }

    pub fn large(workflow: Arc<ChatCreationWorkflow>) -> Self {
        Self::new(ButtonShape::Large, workflow)
    }

    pub fn icon(workflow: Arc<ChatCreationWorkflow>) -> Self {
        Self::new(ButtonShape::Icon, workflow)
    }

    pub fn workflow(&self) -> &ChatCreationWorkflow {
        &self.workflow
    }

    pub fn view(&self) -> ButtonView {
        render(self.shape, self.workflow.is_loading())
    }

    pub async fn click(&self) -> CreateChatOutcome {
        self.workflow.create_new_chat().await
    }
}
