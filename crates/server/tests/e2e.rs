use std::net::SocketAddr;

use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::{startup::build_app, state::AppState};

struct TestApp {
    base_url: String,
}

/// Serve a fresh router over a private in-memory database on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_and_prepare(&DatabaseConfig::in_memory()).await?;
    let app = build_app(AppState::new(db));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn student(name: &str, age: i64, sex: &str, course: &str) -> Value {
    json!({"studentName": name, "age": age, "sex": sex, "course": course})
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_and_get() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/student", app.base_url))
        .json(&student("Ada", 21, "F", "Mathematics"))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_i64().expect("id assigned");
    assert_eq!(created, json!({"id": id, "studentName": "Ada", "age": 21, "sex": "F", "course": "Mathematics"}));

    let res = c.get(format!("{}/student/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);
    Ok(())
}

#[tokio::test]
async fn e2e_create_missing_each_field() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for key in ["studentName", "age", "sex", "course"] {
        let mut body = student("Ada", 21, "F", "Mathematics");
        body.as_object_mut().unwrap().remove(key);
        let res = c.post(format!("{}/student", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "missing {key}");
        let err = res.json::<Value>().await?;
        assert_eq!(err["message"], "Missing required fields");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_list_returns_all_created() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(format!("{}/student", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 0);

    let names = ["Ada", "Grace", "Alan"];
    for n in names {
        let res = c.post(format!("{}/student", app.base_url))
            .json(&student(n, 30, "X", "CS"))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/student", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), names.len());
    let mut got: Vec<String> = list.iter().map(|s| s["studentName"].as_str().unwrap().to_string()).collect();
    got.sort();
    assert_eq!(got, vec!["Ada", "Alan", "Grace"]);
    Ok(())
}

#[tokio::test]
async fn e2e_get_unknown_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/student/9999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Student not found");
    Ok(())
}

#[tokio::test]
async fn e2e_update_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = c.post(format!("{}/student", app.base_url))
        .json(&student("Ada", 21, "F", "Mathematics"))
        .send().await?
        .json::<Value>().await?;
    let id = created["id"].as_i64().unwrap();
    let url = format!("{}/student/{}", app.base_url, id);

    let res = c.put(&url).json(&student("Ada Lovelace", 36, "F", "Engines")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated, json!({"id": id, "studentName": "Ada Lovelace", "age": 36, "sex": "F", "course": "Engines"}));

    // age omitted
    let res = c.put(&url)
        .json(&json!({"studentName": "Ada", "sex": "F", "course": "Engines"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // zero age counts as missing
    let res = c.put(&url).json(&student("Ada", 0, "F", "Engines")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Missing required fields");

    let current = c.get(&url).send().await?.json::<Value>().await?;
    assert_eq!(current, updated);

    let res = c.put(format!("{}/student/9999", app.base_url))
        .json(&student("Nobody", 1, "M", "None"))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_update_to_taken_name_is_conflict() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for n in ["Ada", "Grace"] {
        c.post(format!("{}/student", app.base_url)).json(&student(n, 30, "F", "CS")).send().await?;
    }
    let list = c.get(format!("{}/student", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    let grace = list.iter().find(|s| s["studentName"] == "Grace").unwrap();
    let url = format!("{}/student/{}", app.base_url, grace["id"]);

    let res = c.put(&url).json(&student("Ada", 30, "F", "CS")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let still = c.get(&url).send().await?.json::<Value>().await?;
    assert_eq!(still["studentName"], "Grace");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_then_get_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = c.post(format!("{}/student", app.base_url))
        .json(&student("Ada", 21, "F", "Mathematics"))
        .send().await?
        .json::<Value>().await?;
    let url = format!("{}/student/{}", app.base_url, created["id"]);

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Student not found");
    Ok(())
}
