//! Definitions of Solidity types used during deployment

use alloy_sol_types::sol;

use crate::types::ConstructorArgs;

sol! {
    struct RealityV2ConstructorParams {
        address arbitrator;
        bytes arbitratorExtraData;
        string disputeTemplate;
        string disputeTemplateMappings;
        address disputeTemplateRegistry;
        uint256 feeTimeout;
    }
}

impl From<&ConstructorArgs> for RealityV2ConstructorParams {
    fn from(args: &ConstructorArgs) -> Self {
        Self {
            arbitrator: args.arbitrator,
            arbitratorExtraData: args.extra_data.clone(),
            disputeTemplate: args.dispute_template.clone(),
            disputeTemplateMappings: args.dispute_template_mappings.clone(),
            disputeTemplateRegistry: args.dispute_template_registry,
            feeTimeout: args.fee_timeout,
        }
    }
}
