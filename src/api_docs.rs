use utoipa::OpenApi;
use crate::controllers::estimation_controller;
use crate::models::energy;

#[derive(OpenApi)]
#[openapi(
    paths(
        estimation_controller::get_configuration,
        estimation_controller::put_configuration,
        estimation_controller::get_series,
        estimation_controller::get_filter,
        estimation_controller::put_filter,
        estimation_controller::get_daily_view,
        estimation_controller::get_yearly_view,
        estimation_controller::export_csv
    ),
    components(
        schemas(
            energy::PanelConfiguration,
            energy::PanelConfigurationRequest,
            energy::PanelType,
            energy::Month,
            energy::EnergyPoint,
            energy::SeriesSet,
            energy::SeriesResponse,
            energy::ViewResponse,
            energy::DailyGranularity,
            energy::DisplayFilter
        )
    ),
    tags(
        (name = "solar-yield-sim", description = "Synthetic PV Yield Estimation API")
    )
)]
pub struct ApiDoc;
