//! Checkout flow state machine.
//!
//! `Unselected -> ModeSelected(mode) -> (Submitted | Cancelled)`, with
//! `back` returning a selected mode to `Unselected`. One flow instance per
//! checkout attempt; the terminal states are final.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The chosen delivery channel for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// Order summary POSTed to the notification endpoint.
    Email,
    /// Order summary handed over as a messaging deep link.
    WhatsApp,
}

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Unselected,
    ModeSelected(CheckoutMode),
    Submitted,
    Cancelled,
}

/// Transition attempted from a stage that does not allow it.
#[derive(Debug, Error)]
#[error("invalid checkout transition from {from:?}")]
pub struct InvalidTransition {
    pub from: CheckoutStage,
}

/// A single checkout attempt's flow.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start a fresh flow with no mode selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: CheckoutStage::Unselected,
        }
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Choose a delivery mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless the flow is `Unselected`.
    pub fn select(&mut self, mode: CheckoutMode) -> Result<(), InvalidTransition> {
        match self.stage {
            CheckoutStage::Unselected => {
                self.stage = CheckoutStage::ModeSelected(mode);
                Ok(())
            }
            from => Err(InvalidTransition { from }),
        }
    }

    /// Return from a selected mode to the mode chooser.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless a mode is selected.
    pub fn back(&mut self) -> Result<(), InvalidTransition> {
        match self.stage {
            CheckoutStage::ModeSelected(_) => {
                self.stage = CheckoutStage::Unselected;
                Ok(())
            }
            from => Err(InvalidTransition { from }),
        }
    }

    /// Mark the attempt submitted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] unless a mode is selected.
    pub fn submit(&mut self) -> Result<(), InvalidTransition> {
        match self.stage {
            CheckoutStage::ModeSelected(_) => {
                self.stage = CheckoutStage::Submitted;
                Ok(())
            }
            from => Err(InvalidTransition { from }),
        }
    }

    /// Abandon the attempt from any non-terminal stage.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] from a terminal stage.
    pub fn cancel(&mut self) -> Result<(), InvalidTransition> {
        match self.stage {
            CheckoutStage::Unselected | CheckoutStage::ModeSelected(_) => {
                self.stage = CheckoutStage::Cancelled;
                Ok(())
            }
            from => Err(InvalidTransition { from }),
        }
    }
}
