//! Dispatch behaviour of the micro presenter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use micro_presenter::application::CALLBACK_KEY;
use micro_presenter::templating::TemplateSource;
use micro_presenter::{
    AppRequest, Callback, CallbackResult, Container, HttpRequest, MicroPresenter,
    PresenterConfig, PresenterError, PresenterResponse, Router, ValueType,
};
use serde_json::json;
use url::Url;

mod common;
use common::{container_with_engine, context, StubRouter};

fn raw(text: &'static str) -> Callback {
    Callback::new(move |_| Ok(CallbackResult::Raw(text.to_string())))
}

fn http(url: &str) -> Arc<HttpRequest> {
    Arc::new(HttpRequest::new(Url::parse(url).unwrap()))
}

fn presenter_at(url: &str, router: StubRouter) -> MicroPresenter {
    let router: Arc<dyn Router> = Arc::new(router);
    MicroPresenter::new(context(container_with_engine()), Some(http(url)), Some(router))
}

fn template_source(response: &PresenterResponse) -> TemplateSource {
    response
        .as_text()
        .and_then(|t| t.as_template())
        .and_then(|t| t.source())
        .cloned()
        .expect("template response")
}

#[test]
fn test_get_with_different_canonical_url_redirects_permanently() {
    let mut presenter = presenter_at(
        "http://example.com/Hello/",
        StubRouter::new().canonical("http://example.com/hello"),
    );
    let request = AppRequest::new("Micro", Method::GET).with_callback(raw("never"));

    let response = presenter.run(request).unwrap();
    let redirect = response.as_redirect().expect("redirect");
    assert_eq!(redirect.code(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(redirect.url(), "http://example.com/hello");
}

#[test]
fn test_head_is_canonicalized_too() {
    let mut presenter = presenter_at(
        "http://example.com/a",
        StubRouter::new().canonical("http://example.com/b"),
    );
    let request = AppRequest::new("Micro", Method::HEAD).with_callback(raw("x"));

    assert!(presenter.run(request).unwrap().as_redirect().is_some());
}

#[test]
fn test_post_is_never_redirected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback = Callback::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(CallbackResult::Raw("posted".into()))
    });

    let mut presenter = presenter_at(
        "http://example.com/a",
        StubRouter::new().canonical("http://example.com/elsewhere"),
    );
    let request = AppRequest::new("Micro", Method::POST).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert!(response.as_redirect().is_none());
    assert_eq!(response.as_text().unwrap().render().unwrap(), "posted");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_ajax_is_never_redirected() {
    let router: Arc<dyn Router> =
        Arc::new(StubRouter::new().canonical("http://example.com/elsewhere"));
    let http = Arc::new(HttpRequest::new(Url::parse("http://example.com/a").unwrap()).with_ajax(true));
    let mut presenter = MicroPresenter::new(None, Some(http), Some(router));

    let request = AppRequest::new("Micro", Method::GET).with_callback(raw("ajax"));
    assert!(presenter.run(request).unwrap().as_redirect().is_none());
}

#[test]
fn test_equal_canonical_url_does_not_redirect() {
    let mut presenter = presenter_at(
        "http://example.com/a?y=2&x=1",
        StubRouter::new().canonical("http://example.com/a?x=1&y=2"),
    );
    let request = AppRequest::new("Micro", Method::GET).with_callback(raw("same"));

    assert!(presenter.run(request).unwrap().as_redirect().is_none());
}

#[test]
fn test_canonical_check_needs_router_and_http_request() {
    let mut presenter = MicroPresenter::new(None, Some(http("http://example.com/Weird/")), None);
    let request = AppRequest::new("Micro", Method::GET).with_callback(raw("ok"));
    assert!(presenter.run(request).unwrap().as_redirect().is_none());
}

#[test]
fn test_canonical_redirect_can_be_disabled() {
    let config = PresenterConfig {
        canonical_redirect: false,
        ..Default::default()
    };
    let mut presenter = presenter_at(
        "http://example.com/a",
        StubRouter::new().canonical("http://example.com/b"),
    )
    .with_config(&config);
    let request = AppRequest::new("Micro", Method::GET).with_callback(raw("kept"));

    assert!(presenter.run(request).unwrap().as_redirect().is_none());
}

#[test]
fn test_absent_or_invalid_callback_is_bad_request() {
    let mut presenter = MicroPresenter::new(None, None, None);

    for request in [
        AppRequest::new("Micro", Method::GET),
        AppRequest::new("Micro", Method::GET).with_param(CALLBACK_KEY, json!("not_a_closure")),
        AppRequest::new("Micro", Method::GET).with_param(CALLBACK_KEY, json!(null)),
    ] {
        let err = presenter.run(request).unwrap_err();
        assert!(matches!(
            err,
            PresenterError::BadRequest { code, .. } if code == StatusCode::BAD_REQUEST
        ));
    }
}

#[test]
fn test_string_result_is_inline_template_with_no_extra_params() {
    let mut presenter = MicroPresenter::new(context(container_with_engine()), None, None);
    let callback = Callback::new(|_| Ok(CallbackResult::path("page.html")));
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert_eq!(template_source(&response), TemplateSource::Inline("page.html".into()));

    let text = response.as_text().unwrap();
    let template = text.as_template().unwrap();
    assert!(template.parameters().is_empty());
    assert_eq!(template.presenter(), Some("Micro"));
    assert_eq!(text.render().unwrap(), "page.html");
}

#[test]
fn test_pair_result_uses_inline_source_and_params() {
    let mut presenter = MicroPresenter::new(context(container_with_engine()), None, None);
    let callback = Callback::new(|_| {
        Ok(CallbackResult::inline("inline template text", json!({ "x": 1 })))
    });
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert_eq!(
        template_source(&response),
        TemplateSource::Inline("inline template text".into())
    );
    let template = response.as_text().unwrap().as_template().unwrap();
    assert_eq!(template.parameter("x"), Some(&json!(1)));
}

#[test]
fn test_file_pair_result_keeps_file_loader() {
    let mut presenter = MicroPresenter::new(context(container_with_engine()), None, None);
    let callback = Callback::new(|_| Ok(CallbackResult::file("list.tpl", json!({ "n": 3 }))));
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert_eq!(template_source(&response), TemplateSource::File("list.tpl".into()));
    assert_eq!(response.as_text().unwrap().render().unwrap(), "file:list.tpl");
}

#[test]
fn test_inline_template_renders_request_and_callback_params() {
    let mut presenter = MicroPresenter::new(context(container_with_engine()), None, None);
    let callback = Callback::new(|args| {
        let name: String = args.get("name")?;
        Ok(CallbackResult::inline(
            "Hello {$name}, {$greeting}!",
            json!({ "greeting": format!("welcome {name}") }),
        ))
    })
    .param("name", ValueType::String);
    let request = AppRequest::new("Micro", Method::GET)
        .with_callback(callback)
        .with_param("name", json!("Ada"));

    let response = presenter.run(request).unwrap();
    assert_eq!(
        response.as_text().unwrap().render().unwrap(),
        "Hello Ada, welcome Ada!"
    );
}

#[test]
fn test_arbitrary_response_passes_through_unchanged() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = Callback::new(|_| {
        let custom = (StatusCode::IM_A_TEAPOT, [("x-custom", "1")], "short and stout").into_response();
        Ok(CallbackResult::Response(custom))
    });
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap().into_custom().expect("custom");
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.headers()["x-custom"], "1");
}

#[test]
fn test_redirect_helper_from_callback() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = Callback::new(|args| Ok(args.presenter().redirect_url("/login").into()));
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    let redirect = response.as_redirect().unwrap();
    assert_eq!(redirect.code(), StatusCode::FOUND);
    assert_eq!(redirect.url(), "/login");
}

#[test]
fn test_error_helper_aborts_dispatch_with_404() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = Callback::new(|args| Err(args.presenter().error("Article not found")));
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let err = presenter.run(request).unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Article not found");
}

#[test]
fn test_callback_errors_propagate() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = Callback::new(|_| {
        Err(PresenterError::callback(std::io::Error::new(
            std::io::ErrorKind::Other,
            "database down",
        )))
    });
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let err = presenter.run(request).unwrap_err();
    assert!(matches!(err, PresenterError::Callback(_)));
    assert_eq!(err.code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_presenter_and_request_visible_to_callback() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = Callback::new(|args| {
        let presenter = args.presenter();
        let name = presenter.request().map(|r| r.presenter_name().to_string());
        Ok(CallbackResult::Raw(name.unwrap_or_default()))
    });
    let request = AppRequest::new("Front:Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert_eq!(response.as_text().unwrap().render().unwrap(), "Front:Micro");
}

struct Clock {
    now: u64,
}

struct Mailer;

#[test]
fn test_services_are_injected_by_type() {
    let container = container_with_engine().with_service(Clock { now: 42 });
    let mut presenter = MicroPresenter::new(context(container), None, None);

    let callback = Callback::new(|args| {
        let clock = args.service::<Clock>("clock").expect("clock resolved");
        let mailer = args.service::<Mailer>("mailer");
        Ok(CallbackResult::Raw(format!("{} {}", clock.now, mailer.is_some())))
    })
    .service::<Clock>("clock")
    .service::<Mailer>("mailer");
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let response = presenter.run(request).unwrap();
    assert_eq!(response.as_text().unwrap().render().unwrap(), "42 false");
}

#[test]
fn test_required_service_missing_fails_dispatch() {
    let mut presenter = MicroPresenter::new(context(Container::new()), None, None);
    let callback = raw("unreachable").required_service::<Mailer>("mailer");
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let err = presenter.run(request).unwrap_err();
    assert!(matches!(err, PresenterError::MissingService(_)));
}

#[test]
fn test_missing_argument_is_bad_request() {
    let mut presenter = MicroPresenter::new(None, None, None);
    let callback = raw("unreachable").named("showArticle").param("id", ValueType::Int);
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let err = presenter.run(request).unwrap_err();
    assert!(err.is_bad_request());
    assert_eq!(err.to_string(), "Missing parameter $id required by showArticle.");
}

#[test]
fn test_template_without_engine_factory_fails() {
    let mut presenter = MicroPresenter::new(context(Container::new()), None, None);
    let callback = Callback::new(|_| Ok(CallbackResult::path("page.html")));
    let request = AppRequest::new("Micro", Method::GET).with_callback(callback);

    let err = presenter.run(request).unwrap_err();
    assert!(matches!(err, PresenterError::MissingService("TemplateEngineFactory")));
}
