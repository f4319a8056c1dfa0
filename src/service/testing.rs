//! Scripted [`GenerativeService`] double used across pipeline, audit, and
//! rationalizer tests. Responses are queued ahead of time; every request
//! is recorded for assertion.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{GeneratedContent, GenerativeService, ImageRequest, ServiceError, StructuredRequest};

#[derive(Default)]
pub(crate) struct ScriptedService {
    structured: RefCell<VecDeque<Result<String, ServiceError>>>,
    images: RefCell<VecDeque<Result<GeneratedContent, ServiceError>>>,
    pub structured_requests: RefCell<Vec<StructuredRequest>>,
    pub image_requests: RefCell<Vec<ImageRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_structured(&self, response: Result<String, ServiceError>) {
        self.structured.borrow_mut().push_back(response);
    }

    pub fn push_image(&self, response: Result<GeneratedContent, ServiceError>) {
        self.images.borrow_mut().push_back(response);
    }

    /// Queues an image response carrying both payload bytes and text.
    pub fn push_image_ok(&self, image: &[u8], text: &str) {
        self.push_image(Ok(GeneratedContent {
            image: Some(image.to_vec()),
            text: Some(text.to_string()),
        }));
    }

    pub fn total_calls(&self) -> usize {
        self.structured_requests.borrow().len() + self.image_requests.borrow().len()
    }
}

/// Lets a test hold a handle to the script while the studio owns the
/// injected service.
impl GenerativeService for std::rc::Rc<ScriptedService> {
    fn generate_structured(&self, request: StructuredRequest) -> Result<String, ServiceError> {
        self.as_ref().generate_structured(request)
    }

    fn generate_image(&self, request: ImageRequest) -> Result<GeneratedContent, ServiceError> {
        self.as_ref().generate_image(request)
    }
}

impl GenerativeService for ScriptedService {
    fn generate_structured(&self, request: StructuredRequest) -> Result<String, ServiceError> {
        self.structured_requests.borrow_mut().push(request);
        self.structured
            .borrow_mut()
            .pop_front()
            .expect("unscripted generate_structured call")
    }

    fn generate_image(&self, request: ImageRequest) -> Result<GeneratedContent, ServiceError> {
        self.image_requests.borrow_mut().push(request);
        self.images
            .borrow_mut()
            .pop_front()
            .expect("unscripted generate_image call")
    }
}
