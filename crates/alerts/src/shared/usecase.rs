use std::fmt::Debug;
use tracing::error;
use wayfarer_infra::WayfarerContext;

#[async_trait::async_trait]
pub trait UseCase: Debug + Send {
    type Response;
    type Errors;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &WayfarerContext) -> Result<Self::Response, Self::Errors>;
}

#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx), fields(usecase = U::NAME))]
pub async fn execute<U>(mut usecase: U, ctx: &WayfarerContext) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case: {} error: {:?}", U::NAME, e);
    }

    res
}
