//! End-to-end tests for the signing flow.
//!
//! Each test drives [`TransactionSigner`] the way the device does: a decoded
//! request goes in, a scripted UI answers the prompts, and the resulting
//! bytes are compared against reference NEM serializations.

use nem_transfer::config::{AES_NONCE_LENGTH, AES_TAG_LENGTH, PAYLOAD_SALT_LENGTH};
use nem_transfer::confirm::{ConfirmationUi, Prompt};
use nem_transfer::crypto::SealedBoxCipher;
use nem_transfer::mosaic::{MosaicDefinition, MosaicLookup, MosaicRegistry};
use nem_transfer::transaction::{
    ImportanceTransfer, ImportanceTransferMode, Network, TransactionCommon, TransactionRequest,
    TransactionSigner, Transfer, TransferBuilder,
};
use nem_transfer::{ConfirmStep, TransactionError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SIGNER_HEX: &str = "edfd32f6e760648c032f9acb4b30d514265f6a5b5f8a7154f2618922b4062084";

fn signer_key() -> [u8; 32] {
    hex::decode(SIGNER_HEX).unwrap().try_into().unwrap()
}

/// Answers prompts from a script and records everything it was shown.
struct ScriptedUi {
    answers: Vec<bool>,
    shown: Vec<Prompt>,
}

impl ScriptedUi {
    fn approving() -> Self {
        Self {
            answers: Vec::new(),
            shown: Vec::new(),
        }
    }

    fn rejecting_at(index: usize) -> Self {
        let mut answers = vec![true; index];
        answers.push(false);
        Self {
            answers,
            shown: Vec::new(),
        }
    }

    fn steps(&self) -> Vec<ConfirmStep> {
        self.shown.iter().map(Prompt::step).collect()
    }
}

impl ConfirmationUi for ScriptedUi {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        let answer = self.answers.get(self.shown.len()).copied().unwrap_or(true);
        self.shown.push(prompt.clone());
        answer
    }
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
}

fn testnet_common() -> TransactionCommon {
    TransactionCommon {
        network: Network::Testnet,
        timestamp: 74_649_215,
        fee: 2_000_000,
        deadline: 74_735_615,
    }
}

fn plain_transfer() -> Transfer {
    TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .amount(2_000_000)
        .message("test_nem_transaction_transfer")
        .build()
}

// ---------------------------------------------------------------------------
// Reference vectors
// ---------------------------------------------------------------------------

#[test]
fn testnet_transfer_with_plain_message() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let bytes = signer
        .transfer(&mut ui, &testnet_common(), &plain_transfer())
        .unwrap();

    let expected = concat!(
        "01010000010000987f0e730420000000",
        "edfd32f6e760648c032f9acb4b30d514265f6a5b5f8a7154f2618922b4062084",
        "80841e0000000000ff5f7404",
        "28000000",
        "54414c49434532413733444c59545034333635474e4643555241555033585642464f37594e594f57",
        "80841e0000000000",
        "25000000010000001d000000",
        "746573745f6e656d5f7472616e73616374696f6e5f7472616e73666572",
    );
    assert_eq!(hex::encode(&bytes), expected);

    assert_eq!(
        ui.steps(),
        [ConfirmStep::Payload, ConfirmStep::Transfer, ConfirmStep::Fee]
    );
    assert_eq!(
        ui.shown[1],
        Prompt::Transfer {
            recipient: "TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW".into(),
            amount: "Send 2 XEM".into(),
        }
    );
    assert_eq!(
        ui.shown[2],
        Prompt::Fee {
            fee: "2 XEM".into()
        }
    );
}

#[test]
fn mainnet_transfer_with_mosaics_is_canonical() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let common = TransactionCommon {
        network: Network::Mainnet,
        timestamp: 76_809_215,
        fee: 1_000_000,
        deadline: 76_895_615,
    };
    // Listed out of canonical order on purpose.
    let transfer = TransferBuilder::new("NDMYSLXI4L3FYUQWO4MJOVL6BSTJJXKDSZRMT4LT")
        .amount(1_000_000)
        .mosaic("nem", "xem", 2_000_000)
        .mosaic("abc", "mosaic", 10)
        .build();

    let bytes = signer.transfer(&mut ui, &common, &transfer).unwrap();

    let expected = concat!(
        "0101000002000068ff03940420000000",
        "edfd32f6e760648c032f9acb4b30d514265f6a5b5f8a7154f2618922b4062084",
        "40420f00000000007f559504",
        "28000000",
        "4e444d59534c5849344c3346595551574f344d4a4f564c364253544a4a584b44535a524d54344c54",
        "40420f0000000000",
        "00000000",
        "02000000",
        "1d0000001100000003000000616263060000006d6f736169630a00000000000000",
        "1a0000000e000000030000006e656d0300000078656d80841e0000000000",
    );
    assert_eq!(hex::encode(&bytes), expected);

    assert_eq!(
        ui.steps(),
        [
            ConfirmStep::UnknownMosaic,
            ConfirmStep::UnknownMosaicTransfer,
            ConfirmStep::Transfer,
            ConfirmStep::Fee,
        ]
    );
    assert_eq!(
        ui.shown[1],
        Prompt::UnknownMosaicTransfer {
            raw_units: 10,
            identifier: "abc.mosaic".into(),
        }
    );
}

#[test]
fn testnet_importance_transfer() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let common = TransactionCommon {
        network: Network::Testnet,
        timestamp: 12_349_215,
        fee: 9_900,
        deadline: 12_435_615,
    };
    let request = TransactionRequest::ImportanceTransfer(ImportanceTransfer {
        mode: ImportanceTransferMode::Activate,
        public_key: hex::decode("c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844")
            .unwrap()
            .try_into()
            .unwrap(),
    });

    let bytes = signer.sign_request(&mut ui, &common, &request).unwrap();

    let expected = concat!(
        "01080000010000981f6fbc0020000000",
        "edfd32f6e760648c032f9acb4b30d514265f6a5b5f8a7154f2618922b4062084",
        "ac260000000000009fc0bd00",
        "01000000",
        "20000000c5f54ba980fcbb657dbaaa42700539b207873e134d2375efeab5f1ab52f87844",
    );
    assert_eq!(hex::encode(&bytes), expected);
    assert_eq!(
        ui.shown,
        vec![
            Prompt::ImportanceMode {
                mode: ImportanceTransferMode::Activate
            },
            Prompt::Fee {
                fee: "0.0099 XEM".into()
            },
        ]
    );
}

// ---------------------------------------------------------------------------
// Payload handling
// ---------------------------------------------------------------------------

#[test]
fn empty_transfer_has_zero_length_payload_and_no_mosaics() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .amount(5)
        .build();
    let bytes = signer.transfer(&mut ui, &testnet_common(), &transfer).unwrap();

    // header (60) + recipient (44) + amount (8), then the payload field.
    assert_eq!(u32_at(&bytes, 4) & 0x00FF_FFFF, 1, "version 1 carries no mosaic list");
    assert_eq!(u32_at(&bytes, 112), 0);
    assert_eq!(bytes.len(), 116);
    assert_eq!(ui.steps(), [ConfirmStep::Transfer, ConfirmStep::Fee]);
}

#[test]
fn encrypted_message_is_sealed_and_not_displayed() {
    let registry = MosaicRegistry::builtin();
    let device = SealedBoxCipher::generate();
    let recipient = SealedBoxCipher::generate();
    let signer = TransactionSigner::new(signer_key(), &registry).with_cipher(&device);
    let mut ui = ScriptedUi::approving();

    let message = "meet me at the usual place";
    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .amount(1)
        .message(message)
        .encrypt_to(recipient.public_key())
        .build();

    let bytes = signer.transfer(&mut ui, &testnet_common(), &transfer).unwrap();

    assert_eq!(
        ui.shown[0],
        Prompt::Payload {
            text: None,
            encrypted: true
        }
    );
    assert!(ui.shown.iter().all(|p| !p.to_string().contains(message)));

    let sealed_len = PAYLOAD_SALT_LENGTH + AES_NONCE_LENGTH + message.len() + AES_TAG_LENGTH;
    assert_eq!(u32_at(&bytes, 112) as usize, sealed_len + 8);
    assert_eq!(u32_at(&bytes, 116), 2, "encrypted payload type");
    assert_eq!(u32_at(&bytes, 120) as usize, sealed_len);

    let sealed = &bytes[124..124 + sealed_len];
    let opened = recipient.open(&device.public_key(), sealed).unwrap();
    assert_eq!(opened, message.as_bytes());
}

#[test]
fn encryption_without_key_material_is_malformed() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .message("secret")
        .encrypt_to([9u8; 32])
        .build();
    assert!(matches!(
        signer.transfer(&mut ui, &testnet_common(), &transfer),
        Err(TransactionError::MalformedInput(_))
    ));
    assert!(ui.shown.is_empty());
}

#[test]
fn non_utf8_payload_is_malformed() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .payload(vec![0x66, 0x6F, 0x80])
        .build();
    assert!(matches!(
        signer.transfer(&mut ui, &testnet_common(), &transfer),
        Err(TransactionError::MalformedInput(_))
    ));
}

// ---------------------------------------------------------------------------
// Rejection and overflow
// ---------------------------------------------------------------------------

#[test]
fn rejection_at_every_step_yields_nothing() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let transfer = plain_transfer();
    let before = transfer.clone();

    for (index, step) in [ConfirmStep::Payload, ConfirmStep::Transfer, ConfirmStep::Fee]
        .into_iter()
        .enumerate()
    {
        let mut ui = ScriptedUi::rejecting_at(index);
        let result = signer.transfer(&mut ui, &testnet_common(), &transfer);
        assert!(matches!(result, Err(TransactionError::UserRejected(s)) if s == step));
        assert_eq!(ui.shown.len(), index + 1);
        assert_eq!(transfer, before);
    }
}

#[test]
fn oversized_mosaic_quantity_is_an_encoding_error() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    // (2^64 - 1)^2 / 10^6 does not fit in 64 bits.
    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .amount(u64::MAX)
        .mosaic("foo", "bar", u64::MAX)
        .build();
    let result = signer.transfer(&mut ui, &testnet_common(), &transfer);
    assert!(matches!(
        result,
        Err(TransactionError::EncodingOverflow { .. })
    ));
    assert!(ui.shown.is_empty(), "overflow surfaces before any prompt");
}

/// A lookup outside the registry's bounds, as a host-supplied table might be.
struct WideLookup(MosaicDefinition);

impl MosaicLookup for WideLookup {
    fn lookup(&self, namespace: &str, mosaic: &str, _: Network) -> Option<&MosaicDefinition> {
        (self.0.namespace == namespace && self.0.mosaic == mosaic).then_some(&self.0)
    }
}

#[test]
fn wide_divisibility_renders_without_panicking() {
    let lookup = WideLookup(MosaicDefinition {
        name: "Wide".into(),
        ticker: "WIDE".into(),
        namespace: "x".into(),
        mosaic: "y".into(),
        divisibility: 70_000,
        levy: None,
        networks: None,
    });
    let signer = TransactionSigner::new(signer_key(), &lookup);
    let mut ui = ScriptedUi::approving();

    let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
        .amount(1_000_000)
        .mosaic("x", "y", 1)
        .build();
    signer.transfer(&mut ui, &testnet_common(), &transfer).unwrap();

    let Prompt::Mosaic { amount, name } = &ui.shown[0] else {
        panic!("expected a mosaic prompt, got {:?}", ui.shown[0]);
    };
    assert_eq!(name, "Wide");
    assert_eq!(amount, &format!("0.{}1 WIDE", "0".repeat(69_999)));
}

#[test]
fn registry_refuses_wide_divisibility_from_json() {
    let json = r#"[{ "name": "Wide", "ticker": "WIDE", "namespace": "x", "mosaic": "y",
                     "divisibility": 70000 }]"#;
    assert!(matches!(
        MosaicRegistry::from_json(json),
        Err(TransactionError::MalformedInput(_))
    ));
}

#[test]
fn wrong_network_recipient_is_rejected_up_front() {
    let registry = MosaicRegistry::builtin();
    let signer = TransactionSigner::new(signer_key(), &registry);
    let mut ui = ScriptedUi::approving();

    let common = TransactionCommon {
        network: Network::Mainnet,
        ..testnet_common()
    };
    assert!(matches!(
        signer.transfer(&mut ui, &common, &plain_transfer()),
        Err(TransactionError::MalformedInput(_))
    ));
    assert!(ui.shown.is_empty());
}
