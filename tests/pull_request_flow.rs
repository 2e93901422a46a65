use actix_web::{http::StatusCode, test};
use review_roster::types::pull_request::{
    RPullRequestCreate, RPullRequestMerge, RPullRequestReassign,
};
use review_roster::types::team::RTeamCreate;

mod common;
use common::client::TestClient;
use common::{test_data, TestContext};

async fn seed_team(ctx: &TestContext, name: &str, member_ids: &[&str]) {
    let team = test_data::sample_team(name, member_ids);
    ctx.db
        .create_team(&team.team_name, &team.members)
        .await
        .expect("Failed to seed team");
}

fn create_payload(id: &str, author: &str) -> RPullRequestCreate {
    RPullRequestCreate {
        pull_request_id: id.to_string(),
        pull_request_name: format!("PR {id}"),
        author_id: author.to_string(),
    }
}

#[actix_web::test]
async fn test_create_assigns_two_reviewers_never_the_author() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b", "c", "d"]).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["pull_request_id"], "pr-1");
    assert_eq!(body["author_id"], "a");
    assert_eq!(body["status"], "OPEN");
    assert!(body["merged_at"].is_null());

    let reviewers: Vec<&str> = body["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert_eq!(reviewers.len(), 2);
    assert_ne!(reviewers[0], reviewers[1]);
    assert!(!reviewers.contains(&"a"));
    assert!(reviewers.iter().all(|r| ["b", "c", "d"].contains(r)));
}

#[actix_web::test]
async fn test_create_rejects_duplicate_id() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b"]).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "b"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PR_EXISTS");
}

#[actix_web::test]
async fn test_create_rejects_unknown_author() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "ghost"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_create_rejects_inactive_author() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let team = RTeamCreate {
        team_name: "backend".to_string(),
        members: vec![test_data::inactive_member("a"), test_data::member("b")],
    };
    ctx.db
        .create_team(&team.team_name, &team.members)
        .await
        .expect("Failed to seed team");

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "AUTHOR_INACTIVE");
}

#[actix_web::test]
async fn test_create_with_small_team_assigns_fewer_reviewers() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    // One candidate besides the author
    seed_team(&ctx, "duo", &["a", "b"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["assigned_reviewers"], serde_json::json!(["b"]));

    // Author all alone: zero reviewers is still a valid pull request
    seed_team(&ctx, "solo", &["z"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-2", "z"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["assigned_reviewers"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_merge_flow_is_idempotent() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b", "c", "d"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let created: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let mut reviewers_before: Vec<String> = created["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    reviewers_before.sort();

    let merge_payload = RPullRequestMerge {
        pull_request_id: "pr-1".to_string(),
    };
    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(&merge_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(first["status"], "MERGED");
    assert!(!first["merged_at"].is_null());

    // Second merge succeeds and mutates nothing
    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(&merge_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(second["status"], "MERGED");
    assert_eq!(first["merged_at"], second["merged_at"]);

    let mut reviewers_after: Vec<String> = second["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    reviewers_after.sort();
    assert_eq!(reviewers_before, reviewers_after);
}

#[actix_web::test]
async fn test_merge_unknown_pull_request() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(RPullRequestMerge {
            pull_request_id: "nope".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_reassign_flow_picks_the_unused_candidate() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b", "c", "d"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let created: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let assigned: Vec<String> = created["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    let unused = ["b", "c", "d"]
        .iter()
        .find(|id| !assigned.contains(&id.to_string()))
        .unwrap()
        .to_string();

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: assigned[0].clone(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    // Only one team member is neither author nor already assigned
    assert_eq!(body["replaced_by"], unused.as_str());

    let reviewers: Vec<&str> = body["pr"]["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert_eq!(reviewers.len(), 2);
    assert!(reviewers.contains(&unused.as_str()));
    assert!(!reviewers.contains(&assigned[0].as_str()));
    assert!(reviewers.contains(&assigned[1].as_str()));
}

#[actix_web::test]
async fn test_reassign_rejected_on_merged_pull_request() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b", "c", "d"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let created: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let assigned: Vec<String> = created["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(RPullRequestMerge {
            pull_request_id: "pr-1".to_string(),
        })
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: assigned[0].clone(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PR_MERGED");

    // Reviewer set stayed frozen
    let (_, reviewers) = ctx.db.get_pull_request("pr-1").await.unwrap().unwrap();
    let mut got = reviewers;
    got.sort();
    let mut expected = assigned;
    expected.sort();
    assert_eq!(got, expected);
}

#[actix_web::test]
async fn test_reassign_rejects_users_not_assigned() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    // The author exists but never reviews their own pull request
    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: "a".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_ASSIGNED");
}

#[actix_web::test]
async fn test_reassign_unknown_pull_request_and_user() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "backend", &["a", "b"]).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "nope".to_string(),
            old_user_id: "b".to_string(),
        })
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: "ghost".to_string(),
        })
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_reassign_without_candidates_is_rejected() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    // Both non-authors are already assigned, so nobody is left to rotate in
    seed_team(&ctx, "trio", &["a", "b", "c"]).await;
    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let created: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(created["assigned_reviewers"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: "b".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NO_CANDIDATE");

    let (_, reviewers) = ctx.db.get_pull_request("pr-1").await.unwrap().unwrap();
    let mut got = reviewers;
    got.sort();
    assert_eq!(got, vec!["b".to_string(), "c".to_string()]);
}

/// Full lifecycle: create with weighted assignment, reassign, deactivate
/// the remaining original reviewer, then merge and verify the frozen set.
#[actix_web::test]
async fn test_full_assignment_scenario() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    seed_team(&ctx, "t", &["a", "b", "c", "d"]).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(create_payload("pr-1", "a"))
        .to_request();
    let created: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let assigned: Vec<String> = created["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert_eq!(assigned.len(), 2);
    let unused = ["b", "c", "d"]
        .iter()
        .find(|id| !assigned.contains(&id.to_string()))
        .unwrap()
        .to_string();

    // Replace the first reviewer: the only legal pick is the unused member
    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(RPullRequestReassign {
            pull_request_id: "pr-1".to_string(),
            old_user_id: assigned[0].clone(),
        })
        .to_request();
    let reassigned: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(reassigned["replaced_by"], unused.as_str());

    // Deactivate the remaining original reviewer: the cascade must bring
    // the first reviewer back in, as the only active non-excluded member
    let req = test::TestRequest::post()
        .uri("/users/setIsActive")
        .set_json(serde_json::json!({ "user_id": assigned[1], "is_active": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, reviewers) = ctx.db.get_pull_request("pr-1").await.unwrap().unwrap();
    let mut got = reviewers.clone();
    got.sort();
    let mut expected = vec![unused.clone(), assigned[0].clone()];
    expected.sort();
    assert_eq!(got, expected);

    // Merge freezes the set
    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(RPullRequestMerge {
            pull_request_id: "pr-1".to_string(),
        })
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let (pr, frozen) = ctx.db.get_pull_request("pr-1").await.unwrap().unwrap();
    assert!(pr.status.is_terminal());
    let mut frozen_sorted = frozen;
    frozen_sorted.sort();
    assert_eq!(frozen_sorted, got);
}
