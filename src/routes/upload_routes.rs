//! Rutas del endpoint de carga
//!
//! Boundary fino: extrae el archivo del multipart, delega al
//! orquestador y traduce el resultado al contrato HTTP.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};

use crate::controllers::upload_controller::UploadController;
use crate::dto::upload_dto::UploadResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_upload_router() -> Router<AppState> {
    Router::new().route("/", post(upload_file))
}

async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    // Un solo campo de archivo en el body multipart
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Could not read uploaded file: {}", e)))?;

        let controller = UploadController::new(&state);
        let response = controller.upload(&filename, &bytes).await?;
        return Ok(Json(response));
    }

    Err(AppError::InvalidInput("No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::database::DatabaseConfig;
    use crate::config::environment::EnvironmentConfig;
    use crate::repositories::vehicle_repository::VehicleRepository;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    const BOUNDARY: &str = "fleet-upload-test-boundary";

    async fn test_app() -> (Router, AppState, tempfile::TempDir) {
        let pool = DatabaseConfig::create_test_pool().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = EnvironmentConfig {
            database_url: "sqlite::memory:".to_string(),
            upload_folder: dir.path().to_path_buf(),
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let state = AppState::new(pool, config);
        VehicleRepository::new(&state).ensure_schema().await.unwrap();

        let app = Router::new()
            .nest("/upload/", create_upload_router())
            .nest("/vehicles/", crate::routes::vehicle_routes::create_vehicle_router())
            .with_state(state.clone());
        (app, state, dir)
    }

    fn multipart_request(filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n",
            boundary = BOUNDARY,
            filename = filename,
            content = content,
        );
        Request::builder()
            .method("POST")
            .uri("/upload/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_csv() -> String {
        "b1,,,,\nb2,,,,\nb3,,,,\nb4,,,,\nb5,,,,\n\
         สถานะ,UNIT ID,หมายเลขทะเบียน,หมายเลขตัวถัง,ชนิดรถ (ยี่ห้อรถ),แบบ/รุ่น GPS\n\
         ใช้งาน,=\"0012345\",กข-1234,VIN0001,Toyota,GT06N\n\
         ไม่ใช้งาน,67890,คง-5678,VIN0002,Isuzu,TK103\n"
            .to_string()
    }

    #[tokio::test]
    async fn test_upload_exitoso_y_lectura() {
        let (app, _state, _dir) = test_app().await;

        let response = app
            .clone()
            .oneshot(multipart_request("flota.csv", &valid_csv()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "File uploaded, and data overwritten successfully"
        );

        // La lectura refleja exactamente el contenido del archivo
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vehicles/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["unit_id"], "0012345");
        assert_eq!(rows[0]["active_status"], "A");
        assert_eq!(rows[1]["active_status"], "D");
    }

    #[tokio::test]
    async fn test_extension_no_permitida_es_400() {
        let (app, _state, _dir) = test_app().await;

        let response = app
            .oneshot(multipart_request("data.txt", "lo que sea"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["detail"],
            "Invalid file type. Only .xls, .xlsx, or .csv allowed."
        );
    }

    #[tokio::test]
    async fn test_interseccion_vacia_es_400() {
        let (app, _state, _dir) = test_app().await;

        let csv = "b1,,\nb2,,\nb3,,\nb4,,\nb5,,\ncol_a,col_b\n1,2\n";
        let response = app
            .oneshot(multipart_request("otro.csv", csv))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "No matching columns found in database");
    }

    #[tokio::test]
    async fn test_multipart_sin_archivo_es_400() {
        let (app, _state, _dir) = test_app().await;

        // Campo sin filename: no cuenta como archivo
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"nota\"\r\n\r\nhola\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        let request = Request::builder()
            .method("POST")
            .uri("/upload/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "No file provided");
    }

    #[tokio::test]
    async fn test_fallo_de_insert_es_500_y_preserva_datos() {
        let (app, state, _dir) = test_app().await;

        let response = app
            .clone()
            .oneshot(multipart_request("flota.csv", &valid_csv()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // unit_id duplicado viola el UNIQUE del store
        let csv = "b1,,,,\nb2,,,,\nb3,,,,\nb4,,,,\nb5,,,,\n\
                   UNIT ID,หมายเลขทะเบียน,หมายเลขตัวถัง,ชนิดรถ (ยี่ห้อรถ),แบบ/รุ่น GPS\n\
                   9001,กข-1,VIN1,Toyota,GT06N\n\
                   9001,กข-2,VIN2,Isuzu,TK103\n";
        let response = app
            .oneshot(multipart_request("dup.csv", csv))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().starts_with("Database error:"));

        // El reemplazo fallido no dejó la tabla a medias
        let repository = VehicleRepository::new(&state);
        assert_eq!(repository.count().await.unwrap(), 2);
    }
}
