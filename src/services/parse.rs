use log::warn;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};

use crate::types::request::Request;

/// Turns button tokens (`U3`, `D7`, `P8`) into [`Request`]s for the inner service.
pub struct ParseService<S> {
    inner: S,
}

impl<S> ParseService<S> {
    pub fn new(inner: S) -> Self {
        ParseService { inner }
    }
}

impl<'a, S> Service<&'a str> for ParseService<S>
where
    S: Service<Request>,
    S::Error: Into<BoxError>,
    S::Response: 'static,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, BoxError>>>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, raw: &'a str) -> Self::Future {
        match raw.parse::<Request>() {
            Ok(request) => {
                let fut = self.inner.call(request);
                Box::pin(async move { fut.await.map_err(Into::<BoxError>::into) })
            }
            Err(e) => {
                warn!("invalid request token {raw:?}: {e:#}");
                let err: BoxError = e.into();
                Box::pin(async move { Err::<S::Response, _>(err) })
            }
        }
    }
}

pub struct ParseLayer;

impl<S> Layer<S> for ParseLayer {
    type Service = ParseService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ParseService::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::services::{DispatchService, FloorRange};
    use crate::types::outcome::CarId;
    use crate::types::request::Direction;
    use tower::{ServiceBuilder, ServiceExt, service_fn};

    #[tokio::test]
    async fn forwards_parsed_requests() {
        let inner = service_fn(|r: Request| async move { Ok::<_, BoxError>(r) });
        let mut svc = ParseLayer.layer(inner);

        let parsed = ServiceExt::<&str>::ready(&mut svc)
            .await
            .unwrap()
            .call("d7")
            .await
            .unwrap();
        assert_eq!(parsed, Request::hall(7, Direction::Down));
    }

    #[tokio::test]
    async fn bad_tokens_never_reach_the_inner_service() {
        let inner = service_fn(|_: Request| async move {
            Err::<(), BoxError>(BoxError::from("inner service called"))
        });
        let mut svc = ParseLayer.layer(inner);
        let err = svc.call("X4").await.unwrap_err();
        assert_eq!(err.to_string(), "unknown request button: X");
    }

    async fn send<S>(svc: &mut S, token: &'static str) -> Result<S::Response, BoxError>
    where
        S: Service<&'static str, Error = BoxError>,
    {
        svc.ready().await?.call(token).await
    }

    #[tokio::test]
    async fn full_pipeline() {
        let mut dispatcher = Dispatcher::<crate::FlagStopSet>::new(3, 1, 10).unwrap();
        dispatcher.car_mut(2).unwrap().place(9, Direction::Idle).unwrap();

        let mut svc = ServiceBuilder::new()
            .layer(ParseLayer)
            .filter(FloorRange::new(1, 10))
            .service(DispatchService::new(&mut dispatcher));

        assert_eq!(send(&mut svc, "U8").await.unwrap(), CarId(3));
        assert_eq!(send(&mut svc, "P2").await.unwrap(), CarId(1));
        assert!(send(&mut svc, "U42").await.is_err());
        assert!(send(&mut svc, "?").await.is_err());
        drop(svc);

        assert_eq!(dispatcher.car(2).unwrap().pending_count(), 1);
        assert_eq!(dispatcher.car(0).unwrap().pending_count(), 1);
    }
}
