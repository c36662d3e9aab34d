mod common;

use actix_web::{http::StatusCode, test};
use common::{client, TestContext};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_register_validates_and_rejects_duplicates() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "name": "", "email": "nope", "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "email", "password"]);

    let user = json!({ "name": "Jane", "email": "Jane@Example.com", "password": "secret" });
    let req = test::TestRequest::post().uri("/register").set_json(&user).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap().to_string();

    let stored = ctx.db.get_user_by_email("jane@example.com").await.unwrap();
    assert_eq!(stored.id, id);
    assert!(holiday_planner::utils::crypto::verify_password("secret", &stored.password).unwrap());

    let req = test::TestRequest::post().uri("/register").set_json(&user).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_creating_teams_needs_the_admin_key() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .set_json(json!({ "name": "Platform" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", "Bearer wrong-key"))
        .set_json(json!({ "name": "Platform" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("Authorization", format!("Bearer {}", client::ADMIN_KEY)))
        .set_json(json!({ "name": "Platform" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let team: Value = test::read_body_json(resp).await;
    assert_eq!(team["name"], "Platform");

    // reads stay open
    let req = test::TestRequest::get().uri("/teams").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let teams: Value = test::read_body_json(resp).await;
    assert_eq!(teams.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_team_membership_routes() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;
    let bob = ctx.user("Bob").await;
    let team = ctx.team("Platform").await;

    let add = json!({ "userId": bob, "teamId": team, "userRole": 0 });
    let req = test::TestRequest::post().uri("/teams/users").set_json(&add).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/teams/users").set_json(&add).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/teams/{team}/users"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let roster: Value = test::read_body_json(resp).await;
    assert_eq!(roster[0]["id"], bob.as_str());
    assert_eq!(roster[0]["userRole"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/teams/{team}/users/{bob}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/teams/{team}/users/{bob}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invite_routes() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;
    let alice = ctx.user("Alice").await;
    let bob = ctx.user("Bob").await;
    let team = ctx.team("Platform").await;

    let req = test::TestRequest::post()
        .uri("/invites")
        .set_json(json!({ "fromUserId": alice, "toUserId": "bob", "teamId": team }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/invites")
        .set_json(json!({ "fromUserId": alice, "toUserId": bob, "teamId": team, "inviteType": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invite: Value = test::read_body_json(resp).await;
    let id = invite["id"].as_str().unwrap().to_string();
    assert_eq!(invite["status"], 0);

    let req = test::TestRequest::post()
        .uri(&format!("/invites/{id}/approve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 1);

    // bob is on the team now, a second invite cannot be approved
    let req = test::TestRequest::post()
        .uri("/invites")
        .set_json(json!({ "fromUserId": alice, "toUserId": bob, "teamId": team }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let again: Value = test::read_body_json(resp).await;
    let req = test::TestRequest::post()
        .uri(&format!("/invites/{}/approve", again["id"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");

    let req = test::TestRequest::get()
        .uri(&format!("/invites/to/{bob}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let list: Value = test::read_body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["fromUserName"], "Alice");

    let req = test::TestRequest::get()
        .uri(&format!("/invites/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_vacation_routes() {
    let ctx = TestContext::new().await;
    let app = test::init_service(client::create_app(ctx.db.clone())).await;
    let alice = ctx.user("Alice").await;
    let lead = ctx.user("Lead").await;
    let team = ctx.team("Platform").await;

    let req = test::TestRequest::post()
        .uri("/vacations/request")
        .set_json(json!({
            "requestedFrom": alice, "toUserId": lead, "teamId": team, "info": "Trip",
            "fromDate": "2024-08-10", "toDate": "2024-08-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/vacations/request")
        .set_json(json!({
            "requestedFrom": alice, "toUserId": lead, "teamId": team, "info": "Trip",
            "fromDate": "2024-08-01", "toDate": "2024-08-10"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let request: Value = test::read_body_json(resp).await;
    let request_id = request["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/vacations/requests/updateApproval")
        .set_json(json!({ "requestId": request_id, "approverId": lead, "status": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = test::read_body_json(resp).await;
    assert_eq!(outcome["approvalStatus"], 1);
    assert_eq!(outcome["requestStatus"], 3);

    let req = test::TestRequest::get()
        .uri(&format!("/vacations/requests/{request_id}/approvals"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let approvals: Value = test::read_body_json(resp).await;
    assert_eq!(approvals[0]["approverId"], lead.as_str());
    assert_eq!(approvals[0]["status"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/vacations/requests/from/{alice}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let mine: Value = test::read_body_json(resp).await;
    assert_eq!(mine[0]["toUserName"], "Lead");
    assert_eq!(mine[0]["fromDate"], "2024-08-01");
}
