// Application state for HTTP handlers
use crate::application::analytics_service::AnalyticsService;
use crate::application::station_service::StationService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::survey_service::SurveyService;

#[derive(Clone)]
pub struct AppState {
    pub station_service: StationService,
    pub survey_service: SurveyService,
    pub analytics_service: AnalyticsService,
    pub streaming_service: StreamingDashboardService,
}
