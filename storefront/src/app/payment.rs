//! # Card Payment Confirmation
//!
//! Card payments are confirmed with a one-time code before the order is
//! placed. The code is generated locally: this is a checkout simulation, not
//! an authentication mechanism.
//!
//! ```text
//! CollectingCard ──send_code──► OtpSent ──matching code──► PlacingOrder
//!                                 ▲  │ resend                 │
//!                                 │  └──────┘                 ├─ ok  ──► Verified(Success)
//!                                 │                           └─ err ──► Verified(Failed)
//!                                 └────── matching code (retry) ◄────────────┘
//! ```

use rand::Rng;
use std::fmt;

pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Upi,
    Cod,
}

impl PaymentMethod {
    /// Wire value of the `payment_method` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Cod => "cod",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Success,
    /// Placement failed; the same code may be entered again.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    CollectingCard,
    OtpSent,
    /// The code matched and the order request is in flight.
    PlacingOrder,
    Verified(VerificationOutcome),
}

/// Result of checking an entered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    /// Matched; the caller must now place the order and report back.
    Matched,
    Mismatch,
    /// No code is awaiting entry in the current state.
    NotAwaiting,
}

/// Source of one-time codes.
pub trait OtpGenerator: Send + Sync {
    fn generate(&mut self) -> u32;
}

/// Uniform codes in `100000..=999999` from the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomOtp;

impl OtpGenerator for RandomOtp {
    fn generate(&mut self) -> u32 {
        rand::rng().random_range(OTP_MIN..=OTP_MAX)
    }
}

pub struct OtpFlow {
    state: OtpState,
    code: Option<String>,
    generator: Box<dyn OtpGenerator>,
}

impl fmt::Debug for OtpFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpFlow")
            .field("state", &self.state)
            .field("code_issued", &self.code.is_some())
            .finish()
    }
}

impl OtpFlow {
    pub fn new(generator: Box<dyn OtpGenerator>) -> Self {
        Self {
            state: OtpState::CollectingCard,
            code: None,
            generator,
        }
    }

    pub fn state(&self) -> OtpState {
        self.state
    }

    /// The code awaiting entry, for the local simulation display.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Card fields accepted: issue a code.
    pub fn send_code(&mut self) -> Option<&str> {
        if self.state != OtpState::CollectingCard {
            return None;
        }
        self.issue();
        self.state = OtpState::OtpSent;
        self.code()
    }

    /// Issue a fresh code, staying in (or returning to) `OtpSent`.
    pub fn resend(&mut self) -> Option<&str> {
        match self.state {
            OtpState::OtpSent | OtpState::Verified(VerificationOutcome::Failed) => {
                self.issue();
                self.state = OtpState::OtpSent;
                self.code()
            }
            _ => None,
        }
    }

    pub fn check(&mut self, entered: &str) -> OtpCheck {
        let awaiting = matches!(
            self.state,
            OtpState::OtpSent | OtpState::Verified(VerificationOutcome::Failed)
        );
        if !awaiting {
            return OtpCheck::NotAwaiting;
        }
        match &self.code {
            Some(code) if code == entered.trim() => {
                self.state = OtpState::PlacingOrder;
                OtpCheck::Matched
            }
            _ => OtpCheck::Mismatch,
        }
    }

    /// Report how the order placement after a match ended.
    pub fn record_placement(&mut self, placed: bool) {
        if self.state != OtpState::PlacingOrder {
            return;
        }
        self.state = OtpState::Verified(if placed {
            VerificationOutcome::Success
        } else {
            VerificationOutcome::Failed
        });
    }

    /// Back to card entry, discarding any issued code.
    pub fn reset(&mut self) {
        self.state = OtpState::CollectingCard;
        self.code = None;
    }

    fn issue(&mut self) {
        let code = self.generator.generate().clamp(OTP_MIN, OTP_MAX);
        self.code = Some(code.to_string());
    }
}
