//! Request interceptors applied to every route.
//!
//! Interceptors run in list order before dispatch and in reverse order after
//! it. Any interceptor may answer a request itself; the handler and the
//! interceptors after it are then skipped, and only the ones that already ran
//! see the response on the way out.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::RequestInfo;

/// Decision an interceptor takes before the request is dispatched.
pub enum Flow {
    Continue,
    /// Stop here and answer with this response.
    Respond(Response),
}

pub trait Interceptor: Send + Sync {
    fn before(&self, _req: &RequestInfo) -> Flow {
        Flow::Continue
    }

    fn after(&self, _req: &RequestInfo, _res: &mut Response) {}
}

/// Ordered interceptor list, shared by all requests.
#[derive(Clone)]
pub struct InterceptorChain {
    interceptors: Arc<[Box<dyn Interceptor>]>,
}

impl InterceptorChain {
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self {
            interceptors: interceptors.into(),
        }
    }

    /// Request logging outermost, then CORS.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(RequestLogger), Box::new(Cors::permissive())])
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

pub async fn intercept(
    State(chain): State<InterceptorChain>,
    req: Request,
    next: Next,
) -> Response {
    let info = RequestInfo::new(req.method().clone(), req.uri().path());

    let mut ran = 0;
    let mut early = None;
    for interceptor in chain.interceptors.iter() {
        ran += 1;
        if let Flow::Respond(res) = interceptor.before(&info) {
            early = Some(res);
            break;
        }
    }

    let mut res = match early {
        Some(res) => res,
        None => next.run(req).await,
    };

    for interceptor in chain.interceptors[..ran].iter().rev() {
        interceptor.after(&info, &mut res);
    }
    res
}

/// Logs request start and completion with elapsed time.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogger;

impl Interceptor for RequestLogger {
    fn before(&self, req: &RequestInfo) -> Flow {
        tracing::info!(method = %req.method(), path = %req.path(), "request started");
        Flow::Continue
    }

    fn after(&self, req: &RequestInfo, res: &mut Response) {
        tracing::info!(
            method = %req.method(),
            path = %req.path(),
            status = res.status().as_u16(),
            elapsed_ms = req.elapsed().as_secs_f64() * 1000.0,
            "request completed"
        );
    }
}

/// Cross-origin headers on every response; answers `OPTIONS` preflights
/// directly.
#[derive(Debug, Clone)]
pub struct Cors {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl Cors {
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type"),
        }
    }

    fn headers(&self) -> [(HeaderName, &HeaderValue); 3] {
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, &self.allow_origin),
            (header::ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, &self.allow_headers),
        ]
    }
}

impl Interceptor for Cors {
    fn before(&self, req: &RequestInfo) -> Flow {
        if req.method() == Method::OPTIONS {
            return Flow::Respond(StatusCode::OK.into_response());
        }
        Flow::Continue
    }

    fn after(&self, _req: &RequestInfo, res: &mut Response) {
        for (name, value) in self.headers() {
            res.headers_mut().insert(name, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app(chain: InterceptorChain, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/thing",
                get(move || {
                    let hits = Arc::clone(&hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "hello"
                    }
                }),
            )
            .layer(axum::middleware::from_fn_with_state(chain, intercept))
    }

    fn request(method: Method, uri: &str) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    /// Records the order of hook calls.
    struct Probe {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        stop: bool,
    }

    impl Interceptor for Probe {
        fn before(&self, _req: &RequestInfo) -> Flow {
            self.log.lock().unwrap().push(format!("{}:before", self.name));
            if self.stop {
                return Flow::Respond(StatusCode::IM_A_TEAPOT.into_response());
            }
            Flow::Continue
        }

        fn after(&self, _req: &RequestInfo, _res: &mut Response) {
            self.log.lock().unwrap().push(format!("{}:after", self.name));
        }
    }

    #[tokio::test]
    async fn cors_headers_are_set_on_normal_responses() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = app(InterceptorChain::standard(), hits.clone())
            .oneshot(request(Method::GET, "/thing"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn options_is_answered_without_reaching_the_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = app(InterceptorChain::standard(), hits.clone())
            .oneshot(request(Method::OPTIONS, "/thing"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn hooks_unwind_in_reverse_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new(vec![
            Box::new(Probe { name: "a", log: log.clone(), stop: false }),
            Box::new(Probe { name: "b", log: log.clone(), stop: false }),
        ]);

        app(chain, Arc::new(AtomicUsize::new(0)))
            .oneshot(request(Method::GET, "/thing"))
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:before", "b:before", "b:after", "a:after"]
        );
    }

    #[tokio::test]
    async fn short_circuit_skips_later_interceptors() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let hits = Arc::new(AtomicUsize::new(0));
        let chain = InterceptorChain::new(vec![
            Box::new(Probe { name: "a", log: log.clone(), stop: true }),
            Box::new(Probe { name: "b", log: log.clone(), stop: false }),
        ]);

        let res = app(chain, hits.clone())
            .oneshot(request(Method::GET, "/thing"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(*log.lock().unwrap(), vec!["a:before", "a:after"]);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn standard_chain_has_logger_and_cors() {
        assert_eq!(InterceptorChain::standard().len(), 2);
        assert!(InterceptorChain::new(Vec::new()).is_empty());
    }
}
