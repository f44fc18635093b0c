//!Static descriptor data served to the transport during enumeration
//!
//!These are opaque immutable blobs as far as the rest of the crate is
//!concerned; the transport sends them verbatim over the control endpoint.

/// Size of one input report on the wire, in bytes
pub const REPORT_SIZE: usize = 4;

/// HID report descriptor: three buttons, X/Y and a vertical wheel
///
/// This is defined in Appendix B.2 & E.10 of [Device Class Definition for Human
/// Interface Devices (Hid) Version 1.11](<https://www.usb.org/sites/default/files/hid1_11.pdf>)
#[rustfmt::skip]
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop),
    0x09, 0x02, // Usage (Mouse),
    0xA1, 0x01, // Collection (Application),
    0x09, 0x01, //   Usage (Pointer),
    0xA1, 0x00, //   Collection (Physical),
    0x05, 0x09, //     Usage Page (Buttons),
    0x19, 0x01, //     Usage Minimum (1),
    0x29, 0x03, //     Usage Maximum (3),
    0x15, 0x00, //     Logical Minimum (0),
    0x25, 0x01, //     Logical Maximum (1),
    0x95, 0x03, //     Report Count (3),
    0x75, 0x01, //     Report Size (1),
    0x81, 0x02, //     Input (Data, Variable, Absolute),
    0x95, 0x01, //     Report Count (1),
    0x75, 0x05, //     Report Size (5),
    0x81, 0x01, //     Input (Constant),
    0x05, 0x01, //     Usage Page (Generic Desktop),
    0x09, 0x30, //     Usage (X),
    0x09, 0x31, //     Usage (Y),
    0x15, 0x81, //     Logical Minimum (-127),
    0x25, 0x7F, //     Logical Maximum (127),
    0x75, 0x08, //     Report Size (8),
    0x95, 0x02, //     Report Count (2),
    0x81, 0x06, //     Input (Data, Variable, Relative),
    0x09, 0x38, //     Usage (Wheel),
    0x95, 0x01, //     Report Count (1),
    0x81, 0x06, //     Input (Data, Variable, Relative),
    0xC0,       //   End Collection,
    0xC0,       // End Collection
];

/// Device descriptor for a low-speed HID device with an 8 byte EP0
///
/// Uses the V-USB shared VID/PID pair assigned to mice
/// (<https://github.com/obdev/v-usb/blob/master/usbdrv/USB-IDs-for-free.txt>)
#[rustfmt::skip]
pub const DEVICE_DESCRIPTOR: &[u8] = &[
    18,         // bLength
    0x01,       // bDescriptorType (Device)
    0x01, 0x01, // bcdUSB 1.01
    0x00,       // bDeviceClass (per interface)
    0x00,       // bDeviceSubClass
    0x00,       // bDeviceProtocol
    8,          // bMaxPacketSize0
    0xC0, 0x16, // idVendor 0x16C0
    0xDA, 0x27, // idProduct 0x27DA
    0x00, 0x01, // bcdDevice 1.00
    1,          // iManufacturer
    2,          // iProduct
    3,          // iSerialNumber
    1,          // bNumConfigurations
];
