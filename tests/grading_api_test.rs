mod common;

use anyhow::Result;
use common::{
    assert_display_text, display_text, id_of, TestServer, BAD_COLUMN_ID, BAD_GRADEBOOK_ID,
    BAD_GRADE_SYSTEM_ID,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

const GRADEBOOKS: &str = "/api/v1/grading/gradebooks";
const RESOURCE_ID: &str = "user:xaracil@UOC.EDU";

async fn create_gradebook(server: &TestServer) -> Result<String> {
    let gradebook = server
        .post_json(
            GRADEBOOKS,
            &json!({"name": "for testing only", "description": "for testing only"}),
        )
        .await?;
    Ok(id_of(&gradebook))
}

async fn create_numeric_system(server: &TestServer, gradebook_id: &str) -> Result<Value> {
    server
        .post_json(
            &format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id),
            &json!({
                "name": "Test",
                "highestNumericScore": 100.0,
                "lowestNumericScore": 0.0,
                "numericScoreIncrement": 1.0
            }),
        )
        .await
}

async fn create_letter_system(server: &TestServer, gradebook_id: &str) -> Result<Value> {
    server
        .post_json(
            &format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id),
            &json!({
                "name": "Letter grades",
                "basedOnGrades": true,
                "grades": [
                    {"name": "Pass", "inputScoreStartRange": 50, "inputScoreEndRange": 100, "outputScore": 80},
                    {"name": "Fail", "inputScoreStartRange": 0, "inputScoreEndRange": 49.9, "outputScore": 20}
                ]
            }),
        )
        .await
}

async fn create_column(server: &TestServer, gradebook_id: &str, system_id: &str) -> Result<Value> {
    server
        .post_json(
            &format!("{}/{}/columns", GRADEBOOKS, gradebook_id),
            &json!({"name": "Midterm", "gradeSystemId": system_id}),
        )
        .await
}

#[tokio::test]
async fn test_gradebook_crud() -> Result<()> {
    let server = TestServer::start().await?;
    assert_eq!(server.count(GRADEBOOKS).await?, 0);

    let payload = json!({
        "displayName": display_text("Default Gradebook"),
        "description": display_text("for testing with")
    });
    let gradebook = server.post_json(GRADEBOOKS, &payload).await?;
    assert_eq!(gradebook["type"], "Gradebook");
    for key in ["displayName", "description"] {
        assert_display_text(&gradebook[key], &payload[key]);
    }

    let url = format!("{}/{}", GRADEBOOKS, id_of(&gradebook));
    assert_eq!(server.get_json(&url).await?, gradebook);
    assert_eq!(server.get_json(GRADEBOOKS).await?[0], gradebook);

    let updated = server.put_json(&url, &json!({"name": "a new name"})).await?;
    assert_eq!(updated["displayName"]["text"], "a new name");

    let response = server.put(&url, &json!({"foo": "bar"})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.delete(&url).await?;
    assert_eq!(server.ok_json(response).await?, json!({"success": true}));
    assert_eq!(server.count(GRADEBOOKS).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_gradebook_id_errors() -> Result<()> {
    let server = TestServer::start().await?;
    create_gradebook(&server).await?;

    let response = server.get(&format!("{}/x", GRADEBOOKS)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_url = format!("{}/{}", GRADEBOOKS, BAD_GRADEBOOK_ID);
    assert_eq!(server.get(&bad_url).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        server.put(&bad_url, &json!({"name": "x"})).await?.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(server.delete(&bad_url).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.count(GRADEBOOKS).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_can_create_numeric_grade_system() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;

    let system = create_numeric_system(&server, &gradebook_id).await?;
    assert_eq!(system["basedOnGrades"], false);
    assert_eq!(system["highestNumericScore"], 100.0);
    assert_eq!(system["lowestNumericScore"], 0.0);
    assert_eq!(system["numericScoreIncrement"], 1.0);
    assert_eq!(system["gradebookId"].as_str(), Some(gradebook_id.as_str()));

    let url = format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id);
    assert_eq!(server.get_json(&url).await?[0], system);
    assert_eq!(
        server.get_json(&format!("{}/{}", url, id_of(&system))).await?,
        system
    );
    Ok(())
}

#[tokio::test]
async fn test_numeric_grade_system_requires_scores() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let url = format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id);

    let response = server
        .post(&url, &json!({"name": "Test", "highestNumericScore": 100.0}))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post(
            &format!("{}/{}/gradesystems", GRADEBOOKS, BAD_GRADEBOOK_ID),
            &json!({
                "highestNumericScore": 100.0,
                "lowestNumericScore": 0.0,
                "numericScoreIncrement": 1.0
            }),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(server.count(&url).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_can_create_grade_based_system() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;

    let system = create_letter_system(&server, &gradebook_id).await?;
    assert_eq!(system["basedOnGrades"], true);
    assert_eq!(system["highestNumericScore"], Value::Null);

    let grades = system["grades"].as_array().cloned().unwrap_or_default();
    assert_eq!(grades.len(), 2);
    assert_eq!(grades[0]["displayName"]["text"], "Pass");
    assert_eq!(grades[0]["outputScore"], 80.0);
    assert_eq!(grades[1]["inputScoreEndRange"], 49.9);
    assert_eq!(grades[1]["gradeSystemId"], system["id"]);
    Ok(())
}

#[tokio::test]
async fn test_grade_based_system_with_bad_grades_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let url = format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id);

    let response = server
        .post(&url, &json!({"basedOnGrades": true, "grades": true}))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .ends_with("Grades must be a list of objects."));

    let response = server
        .post(&url, &json!({"basedOnGrades": true, "grades": [{"outputScore": "high"}]}))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // a failed grade leaves no grade system behind
    assert_eq!(server.count(&url).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_can_update_grade_system() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_numeric_system(&server, &gradebook_id).await?;
    let url = format!("{}/{}/gradesystems/{}", GRADEBOOKS, gradebook_id, id_of(&system));

    let updated = server
        .put_json(&url, &json!({"name": "a new name", "highestScore": 10}))
        .await?;
    assert_eq!(updated["displayName"]["text"], "a new name");
    assert_eq!(updated["highestNumericScore"], 10.0);
    assert_eq!(updated["lowestNumericScore"], 0.0);

    let updated = server
        .put_json(
            &url,
            &json!({"basedOnGrades": true, "grades": [{"name": "A", "outputScore": 95}]}),
        )
        .await?;
    assert_eq!(updated["basedOnGrades"], true);
    assert_eq!(updated["highestNumericScore"], Value::Null);
    assert_eq!(updated["grades"].as_array().map(Vec::len), Some(1));

    let updated = server
        .put_json(&url, &json!({"grades": [{"name": "B"}, {"name": "C"}]}))
        .await?;
    assert_eq!(grade_names(&updated), vec![json!("B"), json!("C")]);

    let response = server.put(&url, &json!({"foo": "bar"})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_switching_to_numeric_drops_grades() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_letter_system(&server, &gradebook_id).await?;
    let url = format!("{}/{}/gradesystems/{}", GRADEBOOKS, gradebook_id, id_of(&system));

    let updated = server
        .put_json(
            &url,
            &json!({
                "basedOnGrades": false,
                "highestNumericScore": 20,
                "lowestNumericScore": 0,
                "numericScoreIncrement": 0.5
            }),
        )
        .await?;
    assert_eq!(updated["basedOnGrades"], false);
    assert_eq!(updated["grades"], json!([]));
    assert_eq!(updated["numericScoreIncrement"], 0.5);
    Ok(())
}

fn grade_names(system: &Value) -> Vec<Value> {
    system["grades"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|grade| grade["displayName"]["text"].clone())
        .collect()
}

#[tokio::test]
async fn test_rejected_switch_to_numeric_keeps_grades() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_letter_system(&server, &gradebook_id).await?;
    let url = format!("{}/{}/gradesystems/{}", GRADEBOOKS, gradebook_id, id_of(&system));

    let response = server
        .put(
            &url,
            &json!({"basedOnGrades": false, "highestNumericScore": 0, "lowestNumericScore": 10}),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = server.get_json(&url).await?;
    assert_eq!(unchanged["basedOnGrades"], true);
    assert_eq!(grade_names(&unchanged), vec![json!("Pass"), json!("Fail")]);
    Ok(())
}

#[tokio::test]
async fn test_rejected_grade_replacement_keeps_grades() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_letter_system(&server, &gradebook_id).await?;
    let url = format!("{}/{}/gradesystems/{}", GRADEBOOKS, gradebook_id, id_of(&system));

    let response = server
        .put(
            &url,
            &json!({"grades": [{"name": "C"}, {"name": "D", "outputScore": "high"}]}),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = server.get_json(&url).await?;
    assert_eq!(grade_names(&unchanged), vec![json!("Pass"), json!("Fail")]);
    assert_eq!(unchanged["grades"], system["grades"]);
    Ok(())
}

#[tokio::test]
async fn test_grade_system_delete_rules() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_numeric_system(&server, &gradebook_id).await?;
    let systems_url = format!("{}/{}/gradesystems", GRADEBOOKS, gradebook_id);
    let url = format!("{}/{}", systems_url, id_of(&system));

    let response = server.get(&format!("{}/x", systems_url)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = server
        .delete(&format!("{}/{}", systems_url, BAD_GRADE_SYSTEM_ID))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // a gradebook holding grade systems cannot be deleted
    let response = server
        .delete(&format!("{}/{}", GRADEBOOKS, gradebook_id))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let column = create_column(&server, &gradebook_id, &id_of(&system)).await?;
    assert_eq!(server.delete(&url).await?.status(), StatusCode::CONFLICT);

    server
        .delete(&format!("{}/{}/columns/{}", GRADEBOOKS, gradebook_id, id_of(&column)))
        .await?;
    let response = server.delete(&url).await?;
    assert_eq!(server.ok_json(response).await?, json!({"success": true}));
    assert_eq!(server.count(&systems_url).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_gradebook_column_crud() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let system = create_numeric_system(&server, &gradebook_id).await?;
    let columns_url = format!("{}/{}/columns", GRADEBOOKS, gradebook_id);
    assert_eq!(server.count(&columns_url).await?, 0);

    let payload = json!({
        "displayName": display_text("Final"),
        "description": display_text("for testing with"),
        "gradeSystemId": system["id"]
    });
    let column = server.post_json(&columns_url, &payload).await?;
    for key in ["displayName", "description"] {
        assert_display_text(&column[key], &payload[key]);
    }
    assert_eq!(column["gradeSystemId"], system["id"]);
    assert_eq!(column["gradebookId"].as_str(), Some(gradebook_id.as_str()));

    let url = format!("{}/{}", columns_url, id_of(&column));
    assert_eq!(server.get_json(&url).await?, column);
    assert_eq!(server.get_json(&columns_url).await?[0], column);

    let other = create_letter_system(&server, &gradebook_id).await?;
    let updated = server
        .put_json(&url, &json!({"name": "Renamed", "gradeSystemId": other["id"]}))
        .await?;
    assert_eq!(updated["displayName"]["text"], "Renamed");
    assert_eq!(updated["gradeSystemId"], other["id"]);

    let response = server.put(&url, &json!({"foo": "bar"})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.delete(&url).await?;
    assert_eq!(server.ok_json(response).await?, json!({"success": true}));
    assert_eq!(server.count(&columns_url).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_gradebook_column_errors() -> Result<()> {
    let server = TestServer::start().await?;
    let gradebook_id = create_gradebook(&server).await?;
    let columns_url = format!("{}/{}/columns", GRADEBOOKS, gradebook_id);

    let response = server.post(&columns_url, &json!({"name": "No system"})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post(&columns_url, &json!({"gradeSystemId": BAD_GRADE_SYSTEM_ID}))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server
        .get(&format!("{}/{}/columns", GRADEBOOKS, BAD_GRADEBOOK_ID))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.get(&format!("{}/x", columns_url)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .delete(&format!("{}/{}", columns_url, BAD_COLUMN_ID))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(server.count(&columns_url).await?, 0);
    Ok(())
}

struct EntryFixture {
    server: TestServer,
    gradebook_id: String,
    numeric_column: Value,
    letter_column: Value,
    pass_grade: Value,
}

impl EntryFixture {
    async fn new() -> Result<Self> {
        let server = TestServer::start().await?;
        let gradebook_id = create_gradebook(&server).await?;
        let numeric = create_numeric_system(&server, &gradebook_id).await?;
        let letters = create_letter_system(&server, &gradebook_id).await?;
        let numeric_column = create_column(&server, &gradebook_id, &id_of(&numeric)).await?;
        let letter_column = create_column(&server, &gradebook_id, &id_of(&letters)).await?;
        let pass_grade = letters["grades"][0].clone();

        Ok(Self {
            server,
            gradebook_id,
            numeric_column,
            letter_column,
            pass_grade,
        })
    }

    fn entries_url(&self) -> String {
        format!("{}/{}/entries", GRADEBOOKS, self.gradebook_id)
    }

    fn column_entries_url(&self, column: &Value) -> String {
        format!(
            "{}/{}/columns/{}/entries",
            GRADEBOOKS,
            self.gradebook_id,
            id_of(column)
        )
    }
}

#[tokio::test]
async fn test_can_create_and_list_entries() -> Result<()> {
    let fx = EntryFixture::new().await?;
    let column_url = fx.column_entries_url(&fx.numeric_column);
    assert_eq!(fx.server.count(&fx.entries_url()).await?, 0);
    assert_eq!(fx.server.count(&column_url).await?, 0);

    let entry = fx
        .server
        .post_json(
            &column_url,
            &json!({
                "name": "my new grade entry",
                "description": "for testing with",
                "ignoredForCalculations": true,
                "resourceId": RESOURCE_ID
            }),
        )
        .await?;
    assert_eq!(entry["displayName"]["text"], "my new grade entry");
    assert_eq!(entry["ignoredForCalculations"], true);
    assert_eq!(entry["keyResourceId"], "user%3Axaracil%40UOC.EDU");
    assert_eq!(entry["gradebookColumnId"], fx.numeric_column["id"]);

    let payload = json!({
        "displayName": display_text("second entry"),
        "description": display_text("for testing with"),
        "score": 42.5,
        "resourceId": RESOURCE_ID,
        "columnId": fx.numeric_column["id"]
    });
    let second = fx.server.post_json(&fx.entries_url(), &payload).await?;
    for key in ["displayName", "description"] {
        assert_display_text(&second[key], &payload[key]);
    }
    assert_eq!(second["score"], 42.5);

    assert_eq!(fx.server.count(&fx.entries_url()).await?, 2);
    assert_eq!(fx.server.count(&column_url).await?, 2);
    assert_eq!(fx.server.get_json(&column_url).await?[0], entry);
    assert_eq!(
        fx.server
            .count(&fx.column_entries_url(&fx.letter_column))
            .await?,
        0
    );
    Ok(())
}

#[tokio::test]
async fn test_can_create_grade_based_entry() -> Result<()> {
    let fx = EntryFixture::new().await?;
    let column_url = fx.column_entries_url(&fx.letter_column);

    let entry = fx
        .server
        .post_json(
            &column_url,
            &json!({
                "name": "graded",
                "description": "for testing with",
                "grade": fx.pass_grade["id"],
                "resourceId": RESOURCE_ID
            }),
        )
        .await?;
    assert_eq!(entry["gradeId"], fx.pass_grade["id"]);
    assert_eq!(entry["score"], Value::Null);

    // a score does not fit a grade-based column
    let response = fx
        .server
        .post(&column_url, &json!({"score": 10, "resourceId": RESOURCE_ID}))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // nor a grade a numeric one
    let response = fx
        .server
        .post(
            &fx.column_entries_url(&fx.numeric_column),
            &json!({"grade": fx.pass_grade["id"], "resourceId": RESOURCE_ID}),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(fx.server.count(&fx.entries_url()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_entry_requests() -> Result<()> {
    let fx = EntryFixture::new().await?;
    let column_url = fx.column_entries_url(&fx.numeric_column);
    let payload = json!({
        "name": "my new grade entry",
        "ignoredForCalculations": true,
        "score": 25.0,
        "resourceId": RESOURCE_ID
    });

    let bad_gradebook_url = format!("{}/{}/entries", GRADEBOOKS, BAD_GRADEBOOK_ID);
    assert_eq!(
        fx.server.get(&bad_gradebook_url).await?.status(),
        StatusCode::NOT_FOUND
    );

    let mut with_column = payload.clone();
    with_column["columnId"] = fx.numeric_column["id"].clone();
    assert_eq!(
        fx.server.post(&bad_gradebook_url, &with_column).await?.status(),
        StatusCode::NOT_FOUND
    );

    // gradebook route needs a columnId
    assert_eq!(
        fx.server.post(&fx.entries_url(), &payload).await?.status(),
        StatusCode::BAD_REQUEST
    );

    let bad_column_url = format!(
        "{}/{}/columns/{}/entries",
        GRADEBOOKS, fx.gradebook_id, BAD_COLUMN_ID
    );
    assert_eq!(fx.server.count(&bad_column_url).await?, 0);
    assert_eq!(
        fx.server.post(&bad_column_url, &payload).await?.status(),
        StatusCode::NOT_FOUND
    );

    let mut no_resource = payload.clone();
    if let Some(fields) = no_resource.as_object_mut() {
        fields.remove("resourceId");
    }
    assert_eq!(
        fx.server.post(&column_url, &no_resource).await?.status(),
        StatusCode::BAD_REQUEST
    );

    let no_value = json!({"name": "nothing graded", "resourceId": RESOURCE_ID});
    assert_eq!(
        fx.server.post(&column_url, &no_value).await?.status(),
        StatusCode::BAD_REQUEST
    );

    let out_of_range = json!({"score": 150, "resourceId": RESOURCE_ID});
    assert_eq!(
        fx.server.post(&column_url, &out_of_range).await?.status(),
        StatusCode::BAD_REQUEST
    );

    assert_eq!(fx.server.count(&fx.entries_url()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_can_get_update_and_delete_entry() -> Result<()> {
    let fx = EntryFixture::new().await?;
    let entry = fx
        .server
        .post_json(
            &fx.column_entries_url(&fx.numeric_column),
            &json!({"score": 30, "resourceId": RESOURCE_ID}),
        )
        .await?;
    let url = format!("{}/{}", fx.entries_url(), id_of(&entry));

    assert_eq!(fx.server.get_json(&url).await?, entry);

    let updated = fx
        .server
        .put_json(&url, &json!({"score": 75, "name": "rescored"}))
        .await?;
    assert_eq!(updated["score"], 75.0);
    assert_eq!(updated["displayName"]["text"], "rescored");

    let response = fx.server.put(&url, &json!({"grade": fx.pass_grade["id"]})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = fx.server.put(&url, &json!({"foo": "bar"})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // a column with entries cannot be deleted
    let column_url = format!(
        "{}/{}/columns/{}",
        GRADEBOOKS,
        fx.gradebook_id,
        id_of(&fx.numeric_column)
    );
    assert_eq!(
        fx.server.delete(&column_url).await?.status(),
        StatusCode::CONFLICT
    );

    let response = fx.server.delete(&url).await?;
    assert_eq!(fx.server.ok_json(response).await?, json!({"success": true}));
    assert_eq!(fx.server.get(&url).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_column_summary() -> Result<()> {
    let fx = EntryFixture::new().await?;
    let summary_url = format!(
        "{}/{}/columns/{}/summary",
        GRADEBOOKS,
        fx.gradebook_id,
        id_of(&fx.numeric_column)
    );

    let empty = fx.server.get_json(&summary_url).await?;
    assert_eq!(empty["mean"], 0.0);
    assert_eq!(empty["standardDeviation"], 0.0);

    let column_url = fx.column_entries_url(&fx.numeric_column);
    for score in [50, 80] {
        fx.server
            .post_json(&column_url, &json!({"score": score, "resourceId": RESOURCE_ID}))
            .await?;
    }
    fx.server
        .post_json(
            &column_url,
            &json!({"score": 99, "ignoredForCalculations": true, "resourceId": RESOURCE_ID}),
        )
        .await?;

    let summary = fx.server.get_json(&summary_url).await?;
    let value = |key: &str| summary[key].as_f64().unwrap_or(f64::NAN);
    assert_eq!(value("sum"), 130.0);
    assert_eq!(value("mean"), 65.0);
    assert_eq!(value("median"), 65.0);
    assert_eq!(value("mode"), 50.0);
    assert!((value("standardDeviation") - 15.0).abs() < 1e-9);
    assert!((value("rootMeanSquared") - 4450f64.sqrt()).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_grade_based_summary_uses_output_scores() -> Result<()> {
    let fx = EntryFixture::new().await?;
    fx.server
        .post_json(
            &fx.column_entries_url(&fx.letter_column),
            &json!({"grade": fx.pass_grade["id"], "resourceId": RESOURCE_ID}),
        )
        .await?;

    let summary = fx
        .server
        .get_json(&format!(
            "{}/{}/columns/{}/summary",
            GRADEBOOKS,
            fx.gradebook_id,
            id_of(&fx.letter_column)
        ))
        .await?;
    assert_eq!(summary["sum"], 80.0);
    assert_eq!(summary["mean"], 80.0);
    Ok(())
}
