//! # Settings Page
//!
//! Profile details, password change and the saved address, each its own form
//! reporting into the same message slot.

use super::{targets, SHIPPING_FIELDS};
use crate::app::App;
use crate::core::error::{AppError, Result};
use crate::services::api::{account, SubmitOptions};
use crate::ui::{BoundForm, DisplayCell, MessageKind};
use crate::utils::validation::{validate_new_password, validate_phone, validate_zip_code};
use shared::{Envelope, UserProfilePayload};

const MIN_PASSWORD_LEN: usize = 6;

pub struct SettingsPage {
    app: App,
    pub profile_form: BoundForm,
    pub password_form: BoundForm,
    pub address_form: BoundForm,
    pub forms_visible: DisplayCell<bool>,
}

impl SettingsPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::SETTINGS);
        Self {
            app: app.clone(),
            profile_form: BoundForm::new(&["username", "email"]),
            password_form: BoundForm::new(&["currentPassword", "newPassword", "confirmNewPassword"]),
            address_form: BoundForm::new(SHIPPING_FIELDS),
            forms_visible: DisplayCell::new(true),
        }
    }

    pub async fn load(&self) -> Result<()> {
        let ui = &self.app.ui;
        if !self.app.session.is_logged_in() {
            ui.message(
                "Please log in to view and manage your profile settings.",
                MessageKind::Info,
                targets::SETTINGS,
            );
            self.forms_visible.set(false);
            return Ok(());
        }

        self.forms_visible.set(true);
        ui.busy("Loading your settings...", targets::SETTINGS);
        let profile = match self
            .app
            .requests
            .exchange::<UserProfilePayload>(account::get_user_profile())
            .await
        {
            Ok(envelope) => envelope.data.profile,
            Err(error) if error.is_server_verdict() => None,
            Err(error) => {
                ui.report(
                    MessageKind::Error,
                    "Network error loading settings.",
                    "Network error loading settings. Please try again.",
                    targets::SETTINGS,
                );
                return Err(error);
            }
        };

        match profile {
            Some(profile) => {
                self.profile_form.fill([
                    ("username", profile.username),
                    ("email", profile.email),
                ]);
                self.address_form
                    .fill(profile.shipping_info.unwrap_or_default().form_fields());
                ui.report(
                    MessageKind::Success,
                    "Information loaded successfully.",
                    "Information loaded successfully.",
                    targets::SETTINGS,
                );
            }
            None => {
                tracing::info!("No user profile data found");
                ui.overlay.info("No user profile data found.");
                ui.notifications.clear(targets::SETTINGS);
            }
        }
        Ok(())
    }

    pub async fn update_profile(&self) -> Result<Envelope> {
        self.app
            .requests
            .submit(
                account::update_user_profile(self.profile_form.entries()),
                SubmitOptions::new(targets::SETTINGS),
            )
            .await
    }

    pub async fn change_password(&self) -> Result<Envelope> {
        let form = &self.password_form;
        validate_new_password(
            &form.get("newPassword"),
            &form.get("confirmNewPassword"),
            MIN_PASSWORD_LEN,
        )
        .into_result()
        .map_err(|message| self.reject(message))?;

        self.app
            .requests
            .submit(
                account::change_password(form.entries()),
                SubmitOptions::new(targets::SETTINGS).clearing(form),
            )
            .await
    }

    pub async fn save_address(&self) -> Result<Envelope> {
        let form = &self.address_form;
        if form.trimmed("addressLine2").is_empty() {
            return Err(self.reject("Address Line 2 (Area/Locality) is required.".to_string()));
        }
        validate_zip_code(&form.get("zipCode"))
            .into_result()
            .and_then(|_| validate_phone(&form.get("phone")).into_result())
            .map_err(|message| self.reject(message))?;

        self.app
            .requests
            .submit(
                account::save_shipping_info(form.entries()),
                SubmitOptions::new(targets::SETTINGS),
            )
            .await
    }

    fn reject(&self, message: String) -> AppError {
        self.app
            .ui
            .message(&message, MessageKind::Error, targets::SETTINGS);
        AppError::Validation(message)
    }
}
