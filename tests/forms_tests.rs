use outreach::core::forms::{FeedbackForm, RegistrationForm, validate_feedback, validate_step};
use outreach::core::gate::check_portal_key;
use outreach::core::questions::feedback_steps;
use outreach::errors::AppError;
use outreach::export::range::parse_range;
use outreach::models::{Answer, Event, EventType, Session};
use serde_json::json;

fn fields(err: AppError) -> Vec<(String, String)> {
    match err {
        AppError::Validation(f) => f.into_iter().map(|e| (e.field, e.message)).collect(),
        other => panic!("expected a validation error, got {other}"),
    }
}

fn form(name: &str, email: &str, responses: serde_json::Value) -> FeedbackForm {
    FeedbackForm {
        session_number: None,
        name: name.to_string(),
        email: email.to_string(),
        responses: serde_json::from_value(responses).unwrap(),
    }
}

fn career_event() -> Event {
    Event::new(
        "Career Day",
        EventType::Career,
        vec![
            Session::parse_spec("2025-03-01").unwrap(),
            Session::parse_spec("2025-03-08").unwrap(),
        ],
    )
}

fn career_answers() -> serde_json::Value {
    json!({
        "overall": 4,
        "facilitator": 5,
        "content": "3",
        "recommend": true,
        "career_clarity": 4,
        "career_cv": "No",
        "career_interest": "apprenticeship"
    })
}

#[test]
fn test_registration_form_is_normalized() {
    let form = RegistrationForm {
        name: "  Ada Lovelace ".into(),
        email: " Ada@Example.ORG ".into(),
        phone: "+44 (0)20 7946-0958".into(),
        country: " UK".into(),
    };

    let clean = form.validate().unwrap();
    assert_eq!(clean.name, "Ada Lovelace");
    assert_eq!(clean.email, "ada@example.org");
    assert_eq!(clean.country, "UK");
}

#[test]
fn test_registration_form_reports_all_fields() {
    let err = RegistrationForm::default().validate().unwrap_err();
    let names: Vec<String> = fields(err).into_iter().map(|(f, _)| f).collect();
    assert_eq!(names, vec!["name", "email", "phone", "country"]);

    let err = RegistrationForm {
        name: "Ada".into(),
        email: "ada@localhost".into(),
        phone: "07700-900-123-456-789".into(),
        country: "UK".into(),
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        fields(err),
        vec![
            ("email".to_string(), "is not a valid email address".to_string()),
            ("phone".to_string(), "must contain 7 to 15 digits".to_string()),
        ]
    );

    let err = RegistrationForm {
        name: "Ada".into(),
        email: "ada@example.org".into(),
        phone: "call me".into(),
        country: "UK".into(),
    }
    .validate()
    .unwrap_err();
    assert_eq!(fields(err)[0].0, "phone");
}

#[test]
fn test_feedback_steps_follow_the_module() {
    for module in EventType::ALL {
        let steps = feedback_steps(module);
        let keys: Vec<&str> = steps.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["about", "session", "module", "comments"]);
        assert_eq!(steps[2].title, module.label());
        assert!(!steps[2].questions.is_empty());
    }

    let career = feedback_steps(EventType::Career);
    assert!(career[2].questions.iter().any(|q| q.id == "career_cv"));
    assert!(!career[2].questions.iter().any(|q| q.id == "lead_skill"));
}

#[test]
fn test_feedback_canonical_answers() {
    let ev = career_event();
    let mut f = form(" Sam ", "SAM@example.org", career_answers());
    f.session_number = Some(2);

    let clean = validate_feedback(&ev, &f).unwrap();

    assert_eq!(clean.name, "Sam");
    assert_eq!(clean.email, "sam@example.org");
    assert_eq!(clean.responses["content"], Answer::Scale(3));
    assert_eq!(clean.responses["recommend"], Answer::Flag(true));
    assert_eq!(clean.responses["career_cv"], Answer::Flag(false));
    assert_eq!(
        clean.responses["career_interest"],
        Answer::Text("Apprenticeship".into())
    );
}

#[test]
fn test_feedback_rejects_out_of_range_and_foreign_questions() {
    let ev = career_event();
    let mut answers = career_answers();
    answers["overall"] = json!(6);
    answers["career_interest"] = json!("Astronaut");
    // leadership question on a career event
    answers["lead_skill"] = json!("Delegation");

    let mut f = form("Sam", "sam@example.org", answers);
    f.session_number = Some(3);

    let errs = fields(validate_feedback(&ev, &f).unwrap_err());
    let by_field = |name: &str| {
        errs.iter()
            .find(|(f, _)| f == name)
            .map(|(_, m)| m.clone())
            .unwrap_or_else(|| panic!("no error for {name}"))
    };

    assert_eq!(by_field("overall"), "must be between 1 and 5");
    assert!(by_field("career_interest").starts_with("must be one of: "));
    assert_eq!(by_field("lead_skill"), "is not a question of this form");
    assert_eq!(by_field("session_number"), "session 3 does not exist for this event");
}

#[test]
fn test_feedback_optional_comments_may_be_blank() {
    let ev = career_event();
    let mut answers = career_answers();
    answers["highlights"] = json!("   ");

    let clean = validate_feedback(&ev, &form("Sam", "sam@example.org", answers)).unwrap();
    assert!(!clean.responses.contains_key("highlights"));
}

#[test]
fn test_validate_single_step() {
    let steps = feedback_steps(EventType::Career);
    let f = form("", "nope", json!({ "overall": "great" }));

    let about = validate_step(&steps[0], &f);
    assert_eq!(about.len(), 2);

    let session = validate_step(&steps[1], &f);
    let ids: Vec<&str> = session.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(ids, vec!["overall", "facilitator", "content", "recommend"]);
    assert_eq!(session[0].message, "must be a number from 1 to 5");

    // comments are optional
    assert!(validate_step(&steps[3], &f).is_empty());
}

#[test]
fn test_portal_key_check() {
    assert!(check_portal_key(Some("s3cret"), Some("s3cret")).is_ok());
    assert!(check_portal_key(Some("s3cret"), Some(" s3cret ")).is_ok());
    assert!(matches!(
        check_portal_key(Some("s3cret"), Some("s3cre")),
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        check_portal_key(Some("s3cret"), None),
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        check_portal_key(None, Some("s3cret")),
        Err(AppError::PortalLocked)
    ));
    assert!(matches!(
        check_portal_key(Some("  "), Some("")),
        Err(AppError::PortalLocked)
    ));
}

#[test]
fn test_parse_range() {
    let d = |s: &str| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();

    assert_eq!(parse_range("2024").unwrap(), (d("2024-01-01"), d("2024-12-31")));
    assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
    assert_eq!(parse_range("2024-12").unwrap(), (d("2024-12-01"), d("2024-12-31")));
    assert_eq!(parse_range("2024-05-06").unwrap(), (d("2024-05-06"), d("2024-05-06")));
    assert_eq!(
        parse_range("2023-11:2024-02").unwrap(),
        (d("2023-11-01"), d("2024-02-29"))
    );

    assert!(parse_range("2024:2024-02").is_err());
    assert!(parse_range("2025:2024").is_err());
    assert!(parse_range("24").is_err());
    assert!(parse_range("2024-13").is_err());
}
