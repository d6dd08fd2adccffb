mod api_docs;

pub use api_docs::{
    AnalysisReport, ApiEndpoint, ApiParameter, AuthKind, AuthScheme, IntegrationPath,
    ParsedDocumentation, SdkInfo, WrapperBundle,
};
