//! Sign-in, sign-up with email verification, and logout.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use paywallet_core::guard::{DASHBOARD_PATH, SIGNIN_PATH};
use paywallet_core::models::{EmailCodeRequest, SignInRequest, SignUpRequest};
use paywallet_core::validation::{EmailCodeForm, SignInForm, SignUpForm};
use paywallet_core::views::fallback;
use serde::Deserialize;
use tracing::{info, warn};

use crate::cookies;
use crate::state::AppState;
use crate::views::{render_template, FormStatus, SignInPage, SignUpPage, VerifyEmailPage};

const UNVERIFIED_MESSAGE: &str =
    "Your email address is not verified yet. Enter the code we sent you.";
const SIGNED_UP_MESSAGE: &str = "Account created. Enter the verification code sent to your email.";

pub async fn signin_page() -> Response {
    render_template(SignInPage::default())
}

pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    let mut page = SignInPage {
        email: form.email.trim().to_string(),
        ..Default::default()
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            page.status = FormStatus::rejected(&e);
            return render_template(page);
        }
    };

    let request = SignInRequest {
        email: &valid.email,
        password: &valid.password,
    };
    let token = match state.api().sign_in(&request).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "Sign-in failed");
            page.status = FormStatus::failed(&e, fallback::SIGN_IN);
            return render_template(page);
        }
    };

    if !state.api().with_token(token.as_str()).verify_user().await {
        info!("Sign-in for unverified account");
        return render_template(VerifyEmailPage {
            status: FormStatus::error(UNVERIFIED_MESSAGE),
            email: valid.email,
            ..Default::default()
        });
    }

    info!("User signed in");
    let jar = cookies::store_token(jar, token, state.config.secure_cookies);
    (jar, Redirect::to(DASHBOARD_PATH)).into_response()
}

pub async fn signup_page() -> Response {
    render_template(SignUpPage::default())
}

/// Body of either sign-up step. `step=verify` carries the emailed code.
#[derive(Debug, Default, Deserialize)]
pub struct SignUpSubmission {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub code: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Form(submission): Form<SignUpSubmission>,
) -> Response {
    if submission.step == "verify" {
        verify_email(&state, submission).await
    } else {
        register(&state, submission).await
    }
}

async fn register(state: &AppState, submission: SignUpSubmission) -> Response {
    let form = SignUpForm {
        name: submission.name,
        email: submission.email,
        password: submission.password,
    };
    let mut page = SignUpPage {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        ..Default::default()
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            page.status = FormStatus::rejected(&e);
            return render_template(page);
        }
    };

    let request = SignUpRequest {
        name: &valid.name,
        email: &valid.email,
        password: &valid.password,
    };
    match state.api().sign_up(&request).await {
        Ok(message) => {
            info!("Account registered, awaiting email verification");
            render_template(VerifyEmailPage {
                status: FormStatus::success(message.unwrap_or_else(|| SIGNED_UP_MESSAGE.to_string())),
                email: valid.email,
                ..Default::default()
            })
        }
        Err(e) => {
            warn!(error = %e, "Sign-up failed");
            page.status = FormStatus::failed(&e, fallback::SIGN_UP);
            render_template(page)
        }
    }
}

async fn verify_email(state: &AppState, submission: SignUpSubmission) -> Response {
    let form = EmailCodeForm {
        email: submission.email,
        code: submission.code,
    };
    let mut page = VerifyEmailPage {
        email: form.email.trim().to_string(),
        ..Default::default()
    };

    let (email, code) = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            page.status = FormStatus::rejected(&e);
            return render_template(page);
        }
    };

    let request = EmailCodeRequest {
        email: &email,
        code: &code,
    };
    match state.api().verify_email_code(&request).await {
        Ok(_) => {
            info!("Email verified");
            Redirect::to(SIGNIN_PATH).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Email verification failed");
            page.status = FormStatus::failed(&e, fallback::VERIFY_CODE);
            render_template(page)
        }
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (cookies::clear_token(jar), Redirect::to(SIGNIN_PATH)).into_response()
}
