//! Outer service wrapped around the tower-lsp router

use super::backend::GolangciLintLanguageServer;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;
use tower_lsp::jsonrpc::{Error, ErrorCode, Request, Response};
use tower_lsp::{Client, ClientSocket, LspService};

/// Logs every incoming message and names the method in `MethodNotFound` errors
#[derive(Debug)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S> RequestLogService<S> {
    /// Wrap a service
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Service<Request> for RequestLogService<S>
where
    S: Service<Request, Response = Option<Response>>,
    S::Future: Send + 'static,
    S::Error: 'static,
{
    type Response = Option<Response>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        match request.params() {
            Some(params) => log::debug!("request: {} {}", request.method(), params),
            None => log::debug!("request: {}", request.method()),
        }

        let method = request.method().to_owned();
        let response = self.inner.call(request);
        Box::pin(async move {
            let response = response.await?;
            Ok(response.map(|response| name_unknown_method(response, &method)))
        })
    }
}

/// Replace the router's generic "Method not found" text with the method name
fn name_unknown_method(response: Response, method: &str) -> Response {
    let (id, body) = response.into_parts();
    let body = body.map_err(|err| match err.code {
        ErrorCode::MethodNotFound => {
            log::debug!("unsupported method: {}", method);
            Error {
                code: ErrorCode::MethodNotFound,
                message: format!("method not supported: {}", method).into(),
                data: err.data,
            }
        }
        _ => err,
    });
    Response::from_parts(id, body)
}

/// Build the wrapped service and the socket carrying server-to-client messages
pub fn build_service<F>(
    init: F,
) -> (RequestLogService<LspService<GolangciLintLanguageServer>>, ClientSocket)
where
    F: FnOnce(Client) -> GolangciLintLanguageServer,
{
    let (service, socket) = LspService::new(init);
    (RequestLogService::new(service), socket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::convert::Infallible;
    use tower::ServiceExt;

    fn respond_with(
        body: tower_lsp::jsonrpc::Result<serde_json::Value>,
    ) -> impl Service<
        Request,
        Response = Option<Response>,
        Error = Infallible,
        Future = futures::future::Ready<Result<Option<Response>, Infallible>>,
    > {
        tower::service_fn(move |request: Request| {
            let response = request
                .id()
                .cloned()
                .map(|id| Response::from_parts(id, body.clone()));
            futures::future::ready(Ok(response))
        })
    }

    fn request(method: &'static str) -> Request {
        Request::build(method).params(json!({})).id(7).finish()
    }

    #[tokio::test]
    async fn test_method_not_found_names_method() {
        let mut service = RequestLogService::new(respond_with(Err(Error::method_not_found())));
        let response = service
            .ready()
            .await
            .unwrap()
            .call(request("textDocument/hover"))
            .await
            .unwrap()
            .unwrap();

        let err = response.error().unwrap();
        assert_eq!(err.code, ErrorCode::MethodNotFound);
        assert_eq!(err.message, "method not supported: textDocument/hover");
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let mut service =
            RequestLogService::new(respond_with(Err(Error::invalid_params("missing command"))));
        let response = service
            .ready()
            .await
            .unwrap()
            .call(request("initialize"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            response.error(),
            Some(&Error::invalid_params("missing command"))
        );
    }

    #[tokio::test]
    async fn test_results_pass_through() {
        let mut service = RequestLogService::new(respond_with(Ok(json!({"ok": true}))));
        let response = service
            .ready()
            .await
            .unwrap()
            .call(request("shutdown"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.result(), Some(&json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_notifications_have_no_response() {
        let mut service = RequestLogService::new(respond_with(Err(Error::method_not_found())));
        let notification = Request::build("$/unknownNotification").finish();
        let response = service
            .ready()
            .await
            .unwrap()
            .call(notification)
            .await
            .unwrap();

        assert!(response.is_none());
    }
}
