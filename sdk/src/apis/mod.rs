//! Typed resource clients.
//!
//! Every client here is a thin wrapper over the shared
//! [`HttpClient`](crate::client::HttpClient): shape a [`Request`], hand it to
//! the executor, return the typed response. The only logic they add is
//! precondition validation, surfaced as [`Error::Validation`] before any
//! request is sent.
//!
//! Endpoint paths and field names follow the remote `/open-api/v3/...`
//! contract and are treated as an external, versioned interface.
//!
//! [`Request`]: crate::client::Request
//! [`Error::Validation`]: crate::error::Error::Validation

mod accounts;
mod budgets;
mod card_transactions;
mod cardholders;
mod cards;
mod files;
mod kyc;
mod oauth;
mod payments;
mod payouts;
mod security;
mod transfers;
mod wallets;

pub use accounts::{Account, AccountList, AccountListParams, AccountsApi, RegisterAccountRequest};
pub use budgets::{
    Budget, BudgetBalanceChange, BudgetList, BudgetListParams, BudgetRemoval, BudgetTransaction,
    BudgetTransactionList, BudgetTransactionListParams, BudgetsApi, CreateBudgetRequest,
    UpdateBudgetRequest,
};
pub use card_transactions::{
    CardTransaction, CardTransactionList, CardTransactionListParams, CardTransactionsApi,
    CardTransferRequest, CardTransferResult,
};
pub use cardholders::{
    Cardholder, CardholderAddress, CardholderList, CardholderListParams, CardholdersApi,
    CreateCardholderRequest, IdentityDocument, UpdateCardholderRequest,
};
pub use cards::{
    Card, CardBatch, CardList, CardListParams, CardPrivateInfo, CardRemoval, CardSummary, CardsApi,
    CreateBudgetCardRequest, CreatePrepaidCardRequest, UpdateCardRequest, VelocityControl,
};
pub use files::{FileUpload, FilesApi};
pub use kyc::{
    CddDetail, KycApi, KycStatus, KycSubmission, RiskAssessment, SubmitKycRequest,
    VerificationDetail, KYC_STATUS_APPROVED, KYC_STATUS_EXPIRED, KYC_STATUS_PENDING,
    KYC_STATUS_REJECTED,
};
pub use oauth::{AuthorizeData, OAuthApi, OAuthToken, RefreshedToken};
pub use payments::{
    CancelPaymentRequest, CreatePaymentRequest, CreateRefundRequest, Payment, PaymentsApi, Refund,
    SearchResult,
};
pub use payouts::{
    CreatePayeeRequest, CreatePayoutRequest, CreateQuotationRequest, ExchangeRate, Payee,
    PayeeList, PayeeListParams, Payout, PayoutCancellation, PayoutList, PayoutListParams,
    PayoutsApi, Quotation,
};
pub use security::{SecurityApi, UpdatePinRequest, UpdatePinResult};
pub use transfers::{
    BlockchainTransfer, CreateTransferRequest, FeeAndQuota, FeeAndQuotaRequest, KytAlert,
    TransferKyt, TransferList, TransferListParams, TransfersApi,
};
pub use wallets::{
    CreateAddressRequest, CreateWalletRequest, Wallet, WalletAddress, WalletList, WalletListParams,
    WalletsApi,
};
