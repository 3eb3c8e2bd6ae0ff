//! Session flows driven against a mocked signup API.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use common::{ApiReply, AppError, GENERIC_FAILURE_MESSAGE};
use domain::{
    Country, CountryState, Currency, Field, Industry, Plan, PlanPrice, RefId, Timezone,
    VerificationState,
};
use onboarding::registration::REGISTER_FAILURE_MESSAGE;
use onboarding::{
    EmailVerificationSession, FeedbackKind, LoginSession, RegistrationSession, StaticCodeChannel,
};
use signup_client::{MockSignupApi, ReferenceKind};

fn reference_api() -> MockSignupApi {
    let mut api = MockSignupApi::new();
    api.expect_countries().returning(|| {
        Ok(vec![Country {
            id: RefId::Number(1),
            name_en: "Saudi Arabia".to_string(),
            name_ar: "السعودية".to_string(),
            currency_id: Some(RefId::Number(7)),
            states: vec![CountryState {
                id: RefId::Number(10),
                name_en: "Riyadh".to_string(),
                name_ar: "الرياض".to_string(),
                postal_code: Some("11564".to_string()),
            }],
        }])
    });
    api.expect_currencies().returning(|| {
        Ok(vec![Currency {
            id: RefId::Number(7),
            currency_name: "SAR".to_string(),
            currency_name_ar: "ريال".to_string(),
        }])
    });
    api.expect_time_zones().returning(|| {
        Ok(vec![Timezone {
            id: RefId::Number(4),
            name: "Asia/Riyadh".to_string(),
            offset: Some("+03:00".to_string()),
        }])
    });
    api.expect_industries().returning(|| {
        Ok(vec![Industry {
            id: RefId::Number(2),
            name_en: "Retail".to_string(),
            name_ar: "تجزئة".to_string(),
        }])
    });
    api.expect_plans().returning(|| {
        Ok(vec![Plan {
            id: RefId::Number(3),
            plan_name_en: "Basic".to_string(),
            plan_name_ar: "أساسي".to_string(),
            prices: vec![PlanPrice {
                id: RefId::Number(30),
                monthly_price_en: Some("10 SAR".to_string()),
                monthly_price_ar: None,
            }],
        }])
    });
    api
}

fn fill(session: &mut RegistrationSession) {
    for (field, value) in [
        (Field::IndustryId, "2"),
        (Field::Language, "en"),
        (Field::OrganizationNameEn, "Acme"),
        (Field::OrganizationNameAr, "أكمي"),
        (Field::Email, "owner@acme.test"),
        (Field::Password, "Abc123!@"),
        (Field::CountryId, "1"),
        (Field::CountryStateId, "10"),
        (Field::TimeZoneId, "4"),
        (Field::PlanId, "3"),
        (Field::PlanPriceId, "30"),
        (Field::PlanType, "Monthly"),
    ] {
        session.set_field(field, value).unwrap();
    }
}

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
}

#[tokio::test]
async fn test_mount_loads_lists_and_submit_succeeds() {
    let mut api = reference_api();
    api.expect_register()
        .withf(|form| {
            form.currency_id() == Some(&RefId::Number(7)) && form.postal_code() == "11564"
        })
        .times(1)
        .returning(|_| {
            Ok(ApiReply {
                message: Some("Welcome aboard".to_string()),
                data: None,
            })
        });

    let mut session = RegistrationSession::mount(Arc::new(api)).await;
    assert!(session.load_failures().is_empty());
    fill(&mut session);

    let feedback = session.submit().await.unwrap();

    assert_eq!(feedback.kind, FeedbackKind::Success);
    assert_eq!(feedback.message, "Welcome aboard");
    assert_eq!(session.feedback(), Some(&feedback));
}

#[tokio::test]
async fn test_vat_on_with_empty_sub_fields_blocks_submit() {
    let mut api = reference_api();
    api.expect_register().never();

    let mut session = RegistrationSession::mount(Arc::new(api)).await;
    fill(&mut session);
    session.set_registered_for_vat(true);

    let err = session.submit().await.unwrap_err();

    let AppError::Validation(errors) = err else {
        panic!("expected field errors");
    };
    let fields: Vec<Field> = errors.fields().collect();
    assert_eq!(fields, Field::VAT.to_vec());
    assert_eq!(session.visible_errors(), errors);
}

#[tokio::test]
async fn test_vat_text_survives_toggle() {
    let mut session = RegistrationSession::mount(Arc::new(reference_api())).await;
    session.set_registered_for_vat(true);
    session
        .set_field(Field::TaxRegistrationNumber, "300000000000003")
        .unwrap();

    session.set_registered_for_vat(false);
    assert!(!session.visible_fields().contains(&Field::TaxRegistrationNumber));
    session.set_registered_for_vat(true);

    assert_eq!(session.form().tax_registration_number, "300000000000003");
}

#[tokio::test]
async fn test_hidden_vat_values_are_still_submitted() {
    let mut api = reference_api();
    api.expect_register()
        .withf(|form| {
            !form.registered_for_vat
                && form.tax_registration_number_label == "VAT No."
                && form.tax_registration_number == "300000000000003"
                && form.vat_registered_on == "2024-01-15"
        })
        .times(1)
        .returning(|_| Ok(ApiReply::default()));

    let mut session = RegistrationSession::mount(Arc::new(api)).await;
    fill(&mut session);
    session.set_registered_for_vat(true);
    for (field, value) in [
        (Field::TaxRegistrationNumberLabel, "VAT No."),
        (Field::TaxRegistrationNumber, "300000000000003"),
        (Field::VatRegisteredOn, "2024-01-15"),
    ] {
        session.set_field(field, value).unwrap();
    }
    session.set_registered_for_vat(false);
    assert!(!session.visible_fields().contains(&Field::VatRegisteredOn));

    let feedback = session.submit().await.unwrap();

    assert!(feedback.is_success());
    let payload = serde_json::to_value(session.form()).unwrap();
    assert_eq!(payload["tax_registration_number"], "300000000000003");
    assert_eq!(payload["registered_for_vat"], false);
}

#[tokio::test]
async fn test_register_rejection_shows_server_message() {
    let mut api = reference_api();
    api.expect_register()
        .returning(|_| Err(AppError::rejected("Email already exists")));

    let mut session = RegistrationSession::mount(Arc::new(api)).await;
    fill(&mut session);

    let feedback = session.submit().await.unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert_eq!(feedback.message, "Email already exists");
}

#[tokio::test]
async fn test_register_transport_failure_shows_fallback() {
    let mut api = reference_api();
    api.expect_register().returning(|_| Err(AppError::Timeout));

    let mut session = RegistrationSession::mount(Arc::new(api)).await;
    fill(&mut session);

    let feedback = session.submit().await.unwrap();
    assert_eq!(feedback.message, REGISTER_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_mount_survives_failed_plans() {
    let mut api = MockSignupApi::new();
    api.expect_countries().returning(|| Ok(vec![]));
    api.expect_currencies().returning(|| Ok(vec![]));
    api.expect_time_zones().returning(|| Ok(vec![]));
    api.expect_industries().returning(|| {
        Ok(vec![Industry {
            id: RefId::Number(2),
            name_en: "Retail".to_string(),
            name_ar: String::new(),
        }])
    });
    api.expect_plans()
        .returning(|| Err(AppError::Status(502)));

    let session = RegistrationSession::mount(Arc::new(api)).await;

    assert_eq!(session.load_failures(), &[ReferenceKind::Plans]);
    assert_eq!(session.option_labels(Field::IndustryId).len(), 1);
    assert!(session.option_labels(Field::PlanId).is_empty());
}

#[tokio::test]
async fn test_login_outcomes() {
    let mut api = MockSignupApi::new();
    let mut calls = 0;
    api.expect_login().times(3).returning(move |_| {
        calls += 1;
        match calls {
            1 => Ok(ApiReply::default()),
            2 => Err(AppError::rejected("Invalid credentials")),
            _ => Err(AppError::Transport("connection reset".to_string())),
        }
    });

    let mut session = LoginSession::new(Arc::new(api));
    session.set_email("owner@acme.test");
    session.set_password("Secret123!");

    let ok = session.submit().await.unwrap();
    assert_eq!(ok.kind, FeedbackKind::Success);
    assert_eq!(ok.title, "Login Successfully!");

    let rejected = session.submit().await.unwrap();
    assert_eq!(rejected.title, "Error!");
    assert_eq!(rejected.message, "Invalid credentials");

    let offline = session.submit().await.unwrap();
    assert_eq!(offline.message, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_email_verification_flow() {
    let channel = StaticCodeChannel::new("123456").unwrap();
    let mut session = EmailVerificationSession::new(Arc::new(channel));
    assert!(!session.can_send());

    session.set_email("owner@acme.test").unwrap();
    session.send_code(at(0)).await.unwrap();
    assert!(!session.can_send());
    assert!(session.set_email("other@acme.test").is_err());

    // inside the cooldown
    assert!(!session.can_resend(at(30)));
    assert!(session.resend_code(at(30)).await.is_err());
    assert!(session.resend_code(at(60)).await.is_ok());

    session.set_code("000000");
    let wrong = session.verify().await.unwrap();
    assert_eq!(wrong.kind, FeedbackKind::Error);
    assert_eq!(wrong.message, "The verification code is incorrect.");

    session.set_code("123456");
    let right = session.verify().await.unwrap();
    assert!(right.is_success());
    assert_eq!(session.state(), VerificationState::Verified);
}
