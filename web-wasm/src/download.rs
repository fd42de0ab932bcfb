//! レポートPDFを「名前を付けて保存」させる

use crate::api::FetchTransport;
use equipment_viz_common::{ReportSaver, SaveError};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAnchorElement, Url};

const PDF_MIME_TYPE: &str = "application/pdf";

fn save_error(e: JsValue) -> SaveError {
    SaveError(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Blob URL を一時的に作ってアンカーをクリックする
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobSaver;

impl BlobSaver {
    fn click_link(url: &str, filename: &str) -> Result<(), SaveError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SaveError("document unavailable".into()))?;
        let body = document
            .body()
            .ok_or_else(|| SaveError("document has no body".into()))?;

        let link: HtmlAnchorElement = document
            .create_element("a")
            .map_err(save_error)?
            .dyn_into()
            .map_err(|_| SaveError("failed to create link".into()))?;
        link.set_href(url);
        link.set_download(filename);

        body.append_child(&link).map_err(save_error)?;
        link.click();
        link.remove();
        Ok(())
    }
}

impl ReportSaver for BlobSaver {
    fn save_report(&self, filename: &str, bytes: &[u8]) -> Result<(), SaveError> {
        let blob = crate::api::bytes_to_blob(bytes, PDF_MIME_TYPE).map_err(save_error)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(save_error)?;

        let result = Self::click_link(&url, filename);

        // クリック処理が終わってから解放する
        Timeout::new(0, move || {
            let _ = Url::revoke_object_url(&url);
        })
        .forget();

        result
    }
}

pub type BrowserWorkflow = equipment_viz_common::Workflow<FetchTransport, BlobSaver>;

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_blob_saver_offers_download() {
        BlobSaver
            .save_report("equipment_report_1.pdf", b"%PDF-1.4")
            .expect("save failed");
    }

    #[wasm_bindgen_test]
    fn wasm_blob_has_pdf_type() {
        let blob = crate::api::bytes_to_blob(b"%PDF", PDF_MIME_TYPE).expect("blob failed");
        assert_eq!(blob.type_(), PDF_MIME_TYPE);
        assert_eq!(blob.size() as usize, 4);
    }
}
