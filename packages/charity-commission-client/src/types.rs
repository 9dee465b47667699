/// Operation name for keyword search.
pub const GET_CHARITIES_BY_KEYWORD: &str = "GetCharitiesByKeyword";

/// Operation name for fetching one full register entry.
pub const GET_CHARITY_BY_REGISTERED_CHARITY_NUMBER: &str = "GetCharityByRegisteredCharityNumber";

/// Result element wrapping a full register entry.
pub const CHARITY_RESULT_ELEMENT: &str = "GetCharityByRegisteredCharityNumberResult";
