//! Reading the live state of a crowdsale.

use ethers_core::abi::Token;
use icogen_types::{Address, CrowdsaleSnapshot};

use crate::contract::{CrowdsaleHandle, MethodCall};
use crate::decode;
use crate::error::Result;
use crate::gateway::ContractGateway;

/// Resolve the crowdsale's token and read every snapshot field with its own
/// getter call. `account` is the contributor whose prior contribution is read.
pub async fn fetch_snapshot(
    gateway: &dyn ContractGateway,
    crowdsale: &CrowdsaleHandle,
    account: Address,
) -> Result<CrowdsaleSnapshot> {
    let reader = Reader { gateway, account };

    let token_address = decode::address(reader.read(crowdsale.token()).await?, "token")?;
    let token = gateway.token_at(token_address).await?;

    Ok(CrowdsaleSnapshot {
        token_name: decode::string(reader.read(token.name()).await?, "name")?,
        token_symbol: decode::string(reader.read(token.symbol()).await?, "symbol")?,
        token_decimals: decode::uint32(reader.read(token.decimals()).await?, "decimals")?,
        tokens_minted: decode::uint(
            reader.read(crowdsale.tokens_minted_for_sale()).await?,
            "tokensMintedForSale",
        )?,
        token_cap: decode::uint(reader.read(crowdsale.token_cap()).await?, "tokenCap")?,
        start_time: decode::uint64(reader.read(crowdsale.start_time()).await?, "startTime")?,
        end_time: decode::uint64(reader.read(crowdsale.end_time()).await?, "endTime")?,
        wallet: decode::address(reader.read(crowdsale.wallet()).await?, "wallet")?,
        rate: decode::uint(reader.read(crowdsale.rate()).await?, "rate")?,
        min_contribution: decode::uint(
            reader.read(crowdsale.min_contribution()).await?,
            "minContribution",
        )?,
        max_contribution: decode::uint(
            reader.read(crowdsale.max_contribution()).await?,
            "maxContribution",
        )?,
        wei_raised: decode::uint(reader.read(crowdsale.wei_raised()).await?, "weiRaised")?,
        contribution: decode::uint(
            reader.read(crowdsale.contributions(account)).await?,
            "contributions",
        )?,
    })
}

struct Reader<'a> {
    gateway: &'a dyn ContractGateway,
    account: Address,
}

impl Reader<'_> {
    async fn read(&self, call: MethodCall) -> Result<Vec<Token>> {
        self.gateway.call(self.account, &call).await
    }
}
