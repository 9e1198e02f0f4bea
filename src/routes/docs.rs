//! OpenAPI document endpoint.
//!
//! The specification is small enough to keep as a literal document in code;
//! no doc-generation framework is involved.

use actix_web::HttpResponse;

/// `GET /api-docs.json` — the OpenAPI 3.0 description of this service.
pub async fn openapi_document() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Teamtailor CSV Export API",
            "version": "1.0.0",
            "description": "API for exporting candidate data from Teamtailor as CSV files"
        },
        "paths": {
            "/api/export/candidates": {
                "get": {
                    "tags": ["Export"],
                    "summary": "Export candidates as CSV",
                    "description": "Downloads all candidates with their job applications as a CSV file, streamed page by page from Teamtailor.",
                    "operationId": "exportCandidatesCsv",
                    "responses": {
                        "200": {
                            "description": "CSV file download",
                            "content": {"text/csv": {"schema": {"type": "string"}}},
                            "headers": {
                                "Content-Disposition": {
                                    "description": "Attachment filename",
                                    "schema": {
                                        "type": "string",
                                        "example": "attachment; filename=\"candidates-2024-01-15.csv\""
                                    }
                                }
                            }
                        },
                        "502": {
                            "description": "Teamtailor API failure",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/GatewayError"}
                                }
                            }
                        },
                        "500": {
                            "description": "Internal server error",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Error"}
                                }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Health check endpoint",
                    "operationId": "getHealth",
                    "responses": {
                        "200": {
                            "description": "Success response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "status": {"type": "string", "example": "ok"},
                                            "timestamp": {"type": "string", "format": "date-time"}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/api-docs.json": {
                "get": {
                    "tags": ["Documentation"],
                    "summary": "OpenAPI specification",
                    "operationId": "getOpenApiSpec",
                    "responses": {
                        "200": {
                            "description": "OpenAPI specification",
                            "content": {"application/json": {"schema": {"type": "object"}}}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": {"type": "string", "example": "Internal Server Error"},
                        "message": {"type": "string"}
                    }
                },
                "GatewayError": {
                    "type": "object",
                    "properties": {
                        "error": {"type": "string", "example": "Bad Gateway"},
                        "message": {"type": "string"},
                        "status": {"type": "integer", "example": 404}
                    }
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn serves_an_openapi_3_document_covering_the_export_route() {
        let app = test::init_service(
            App::new().route("/api-docs.json", web::get().to(super::openapi_document)),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api-docs.json").to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["openapi"], "3.0.0");
        assert!(body["paths"]["/api/export/candidates"]["get"].is_object());
        assert!(body["paths"]["/health"]["get"].is_object());
    }
}
