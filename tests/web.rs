use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use listkeeper::store::StoreProvider;
use listkeeper::web;

fn app() -> Router {
    web::router(StoreProvider::memory())
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// The session cookie pair from a response, for replay on later requests.
fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("cookie should have a name=value pair")
        .to_string()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_lists() {
    let response = app().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/lists");
}

#[tokio::test]
async fn test_lists_start_empty_with_no_flash() {
    let response = app().oneshot(get("/lists", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["lists"], Value::Array(Vec::new()));
    assert!(body["flash"].is_null());
}

#[tokio::test]
async fn test_create_list_then_read_it_back() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Groceries", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/lists");
    let cookie = session_cookie(&response);

    let response = app.oneshot(get("/lists", Some(&cookie))).await.unwrap();
    let body = json_body(response).await;

    assert_eq!(body["lists"][0]["id"], 0);
    assert_eq!(body["lists"][0]["name"], "Groceries");
    assert_eq!(body["lists"][0]["todos_count"], 0);
    assert_eq!(body["flash"]["kind"], "success");
    assert_eq!(body["flash"]["message"], "The list has been created.");
}

#[tokio::test]
async fn test_flash_is_drained_after_one_read() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Groceries", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let first = json_body(app.clone().oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert!(!first["flash"].is_null());

    let second = json_body(app.oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert!(second["flash"].is_null());
}

#[tokio::test]
async fn test_invalid_list_name_is_rejected_with_422() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "The list name must be between 1 and 100 characters"
    );
}

#[tokio::test]
async fn test_duplicate_todo_is_rejected_and_not_added() {
    let app = app();

    // create list "Groceries" in a fresh session
    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Groceries", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    // add "Milk"
    let response = app
        .clone()
        .oneshot(form_post("/lists/0/todos", "todo=Milk", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // add "Milk" again: rejected with the uniqueness error
    let response = app
        .clone()
        .oneshot(form_post("/lists/0/todos", "todo=Milk", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "The todo name must be unique");

    // the list still contains exactly one todo named Milk
    let body = json_body(app.oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    let todos = body["todos"].as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["name"], "Milk");
    assert_eq!(todos[0]["completed"], false);
}

#[tokio::test]
async fn test_missing_list_redirects_with_error_flash() {
    let app = app();

    let response = app.clone().oneshot(get("/lists/99", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/lists");
    let cookie = session_cookie(&response);

    let body = json_body(app.oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["flash"]["kind"], "error");
    assert_eq!(body["flash"]["message"], "The specified list was not found.");
}

#[tokio::test]
async fn test_complete_all_and_list_detail_counts() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Chores", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    for body in ["todo=Dishes", "todo=Laundry"] {
        app.clone()
            .oneshot(form_post("/lists/0/todos", body, Some(&cookie)))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(form_post("/lists/0/complete_all", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/lists/0"
    );

    let body = json_body(app.oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["todos_count"], 2);
    assert_eq!(body["todos_remaining_count"], 0);
    assert_eq!(body["complete"], true);
}

#[tokio::test]
async fn test_update_todo_status_via_form_field() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Chores", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    app.clone()
        .oneshot(form_post("/lists/0/todos", "todo=Dishes", Some(&cookie)))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/lists/0/todos/0", "completed=true", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.clone().oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["todos"][0]["completed"], true);

    // and back to open
    app.clone()
        .oneshot(form_post("/lists/0/todos/0", "completed=false", Some(&cookie)))
        .await
        .unwrap();
    let body = json_body(app.oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["todos"][0]["completed"], false);
}

#[tokio::test]
async fn test_completed_todos_sort_last_in_detail_view() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Chores", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    for body in ["todo=First", "todo=Second", "todo=Third"] {
        app.clone()
            .oneshot(form_post("/lists/0/todos", body, Some(&cookie)))
            .await
            .unwrap();
    }
    // complete the first one; it should render after the open ones
    app.clone()
        .oneshot(form_post("/lists/0/todos/0", "completed=true", Some(&cookie)))
        .await
        .unwrap();

    let body = json_body(app.oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    let names: Vec<&str> = body["todos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "Third", "First"]);
}

#[tokio::test]
async fn test_ajax_delete_returns_bare_status() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Doomed", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let request = Request::builder()
        .method("POST")
        .uri("/lists/0/destroy")
        .header(header::COOKIE, &cookie)
        .header("X-Requested-With", "XMLHttpRequest")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json_body(app.oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["lists"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn test_plain_delete_redirects_with_flash() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Doomed", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_post("/lists/0/destroy", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/lists");

    let body = json_body(app.oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["flash"]["message"], "The list \"Doomed\" was deleted.");
}

#[tokio::test]
async fn test_rename_list_via_post() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Old", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_post("/lists/0", "list_name=New", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.oneshot(get("/lists/0", Some(&cookie))).await.unwrap()).await;
    assert_eq!(body["name"], "New");
}

#[tokio::test]
async fn test_sessions_do_not_see_each_others_lists() {
    let app = app();

    let response = app
        .clone()
        .oneshot(form_post("/lists", "list_name=Private", None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    // Same cookie sees the list; a cookie-less request gets a fresh session
    let mine = json_body(app.clone().oneshot(get("/lists", Some(&cookie))).await.unwrap()).await;
    assert_eq!(mine["lists"].as_array().unwrap().len(), 1);

    let theirs = json_body(app.oneshot(get("/lists", None)).await.unwrap()).await;
    assert!(theirs["lists"].as_array().unwrap().is_empty());
}
