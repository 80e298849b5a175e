//! File upload and image delivery endpoints.

use super::{PendingRequest, TasklineClient};
use crate::error::Result;
use crate::types::{
    DeleteFileResponse, OptimizedUrlResponse, TransformedUrlResponse, UploadFileRequest,
    UploadFileResponse, UploadFromUrlRequest,
};

impl TasklineClient {
    /// Upload a file as multipart form data.
    pub async fn upload_file(&self, upload: UploadFileRequest) -> Result<UploadFileResponse> {
        self.send(PendingRequest::post("/files/upload").upload(upload))
            .await
    }

    /// Have the server ingest a file from a remote URL.
    pub async fn upload_from_url(
        &self,
        body: UploadFromUrlRequest,
    ) -> Result<UploadFileResponse> {
        self.send(PendingRequest::post("/files/upload-from-url").json(&body)?)
            .await
    }

    /// Delivery URL with automatic format and quality.
    pub async fn optimized_url(&self, public_id: &str) -> Result<OptimizedUrlResponse> {
        self.send(PendingRequest::get(format!("/files/optimized/{public_id}")))
            .await
    }

    /// Delivery URL cropped to `width` x `height`.
    pub async fn transformed_url(
        &self,
        public_id: &str,
        width: u32,
        height: u32,
    ) -> Result<TransformedUrlResponse> {
        self.send(
            PendingRequest::get(format!("/files/transformed/{public_id}"))
                .query("width", width)
                .query("height", height),
        )
        .await
    }

    /// Delete an uploaded file.
    pub async fn delete_file(&self, public_id: &str) -> Result<DeleteFileResponse> {
        self.send(PendingRequest::delete(format!("/files/{public_id}")))
            .await
    }
}
