//! Read-only bindings for the factory and token contracts the dashboard queries.
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract TNTFactory {
        function getDeployedTNTs(address owner) external view returns (address[] memory);
    }

    #[sol(rpc)]
    contract TNT {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function revokable() external view returns (bool);
    }

    #[sol(rpc)]
    contract CATFactory {
        function getOwnedCATs(address owner) external view returns (address[] memory);
    }

    #[sol(rpc)]
    contract CAT {
        function tokenName() external view returns (string memory);
        function tokenSymbol() external view returns (string memory);
    }
);
