//! Contract handles and the method calls they produce.

use ethers_core::abi::Token;
use icogen_types::{Address, CrowdsaleParameters, H256};

/// Which artifact describes the contract behind a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Crowdsale,
    Token,
}

/// A method invocation against a deployed contract, before ABI encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub contract: ContractKind,
    pub address: Address,
    pub method: &'static str,
    pub args: Vec<Token>,
}

/// Handle on a deployed crowdsale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrowdsaleHandle {
    address: Address,
}

impl CrowdsaleHandle {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn method(&self, method: &'static str, args: Vec<Token>) -> MethodCall {
        MethodCall {
            contract: ContractKind::Crowdsale,
            address: self.address,
            method,
            args,
        }
    }

    /// Address of the token minted by this crowdsale.
    pub fn token(&self) -> MethodCall {
        self.method("token", vec![])
    }

    pub fn tokens_minted_for_sale(&self) -> MethodCall {
        self.method("tokensMintedForSale", vec![])
    }

    pub fn token_cap(&self) -> MethodCall {
        self.method("tokenCap", vec![])
    }

    pub fn start_time(&self) -> MethodCall {
        self.method("startTime", vec![])
    }

    pub fn end_time(&self) -> MethodCall {
        self.method("endTime", vec![])
    }

    pub fn min_contribution(&self) -> MethodCall {
        self.method("minContribution", vec![])
    }

    pub fn max_contribution(&self) -> MethodCall {
        self.method("maxContribution", vec![])
    }

    /// Wei contributed so far by `contributor`.
    pub fn contributions(&self, contributor: Address) -> MethodCall {
        self.method("contributions", vec![Token::Address(contributor)])
    }

    pub fn wei_raised(&self) -> MethodCall {
        self.method("weiRaised", vec![])
    }

    pub fn wallet(&self) -> MethodCall {
        self.method("wallet", vec![])
    }

    pub fn rate(&self) -> MethodCall {
        self.method("rate", vec![])
    }

    /// Payable purchase crediting `beneficiary`.
    pub fn buy_tokens(&self, beneficiary: Address) -> MethodCall {
        self.method("buyTokens", vec![Token::Address(beneficiary)])
    }
}

/// Handle on the token behind a crowdsale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHandle {
    address: Address,
}

impl TokenHandle {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn method(&self, method: &'static str) -> MethodCall {
        MethodCall {
            contract: ContractKind::Token,
            address: self.address,
            method,
            args: vec![],
        }
    }

    pub fn name(&self) -> MethodCall {
        self.method("name")
    }

    pub fn symbol(&self) -> MethodCall {
        self.method("symbol")
    }

    pub fn decimals(&self) -> MethodCall {
        self.method("decimals")
    }
}

/// Result of a successful crowdsale deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub crowdsale: CrowdsaleHandle,
    pub token: TokenHandle,
    pub transaction_hash: H256,
}

/// Constructor arguments in the order the crowdsale factory declares them.
pub fn constructor_args(params: &CrowdsaleParameters, wallet: Address) -> Vec<Token> {
    vec![
        Token::Uint(params.start_time.into()),
        Token::Uint(params.end_time.into()),
        Token::Address(wallet),
        Token::Uint(params.rate),
        Token::Uint(params.token_cap),
        Token::Uint(params.min_contribution),
        Token::Uint(params.max_contribution),
        Token::String(params.token_name.clone()),
        Token::String(params.token_symbol.clone()),
        Token::Uint(params.token_decimals.into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use icogen_types::U256;

    #[test]
    fn test_crowdsale_calls_target_crowdsale() {
        let handle = CrowdsaleHandle::new(Address::repeat_byte(0x01));
        let call = handle.contributions(Address::repeat_byte(0x02));

        assert_eq!(call.contract, ContractKind::Crowdsale);
        assert_eq!(call.address, handle.address());
        assert_eq!(call.method, "contributions");
        assert_eq!(call.args, vec![Token::Address(Address::repeat_byte(0x02))]);
    }

    #[test]
    fn test_token_calls_target_token() {
        let handle = TokenHandle::new(Address::repeat_byte(0x03));
        let call = handle.decimals();

        assert_eq!(call.contract, ContractKind::Token);
        assert_eq!(call.method, "decimals");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_constructor_args_order() {
        let params = CrowdsaleParameters {
            token_name: "Example".into(),
            token_symbol: "EXM".into(),
            token_decimals: 18,
            start_time: 100,
            end_time: 200,
            wallet: String::new(),
            rate: U256::from(1000u64),
            token_cap: U256::exp10(21),
            min_contribution: U256::exp10(17),
            max_contribution: U256::exp10(19),
        };
        let wallet = Address::repeat_byte(0xaa);
        let args = constructor_args(&params, wallet);

        assert_eq!(args.len(), 10);
        assert_eq!(args[0], Token::Uint(U256::from(100u64)));
        assert_eq!(args[1], Token::Uint(U256::from(200u64)));
        assert_eq!(args[2], Token::Address(wallet));
        assert_eq!(args[4], Token::Uint(U256::exp10(21)));
        assert_eq!(args[6], Token::Uint(U256::exp10(19)));
        assert_eq!(args[8], Token::String("EXM".into()));
        assert_eq!(args[9], Token::Uint(U256::from(18u64)));
    }
}
